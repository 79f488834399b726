pub mod paths;

#[cfg(target_arch = "wasm32")]
mod activate;
#[cfg(target_arch = "wasm32")]
mod home;
#[cfg(target_arch = "wasm32")]
mod login;
#[cfg(target_arch = "wasm32")]
mod not_found;
#[cfg(target_arch = "wasm32")]
mod signup;

#[cfg(target_arch = "wasm32")]
pub use view::AppRoutes;

#[cfg(target_arch = "wasm32")]
mod view {
    use super::{
        activate::ActivatePage, home::HomePage, login::SignInPage, not_found::NotFoundPage,
        signup::SignUpPage,
    };
    use crate::features::auth::RequireAuth;
    use leptos::prelude::*;
    use leptos_router::components::{Outlet, ParentRoute, Route, Routes};
    use leptos_router::path;

    /// Layout for everything behind the route gate.
    #[component]
    fn ProtectedLayout() -> impl IntoView {
        view! {
            <RequireAuth>
                <Outlet />
            </RequireAuth>
        }
    }

    #[component]
    pub fn AppRoutes() -> impl IntoView {
        view! {
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route path=path!("/auth") view=SignInPage />
                <Route path=path!("/auth/signup") view=SignUpPage />
                <Route path=path!("/auth/activate/:id") view=ActivatePage />
                <ParentRoute path=path!("") view=ProtectedLayout>
                    <Route path=path!("") view=HomePage />
                </ParentRoute>
            </Routes>
        }
    }
}
