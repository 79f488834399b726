use crate::features::auth::state::{use_auth, AuthProvider};
use crate::routes::AppRoutes;
use leptos::prelude::*;
use leptos_router::components::Router;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <AuthProvider>
            <Booted>
                <Router>
                    <AppRoutes />
                </Router>
            </Booted>
        </AuthProvider>
    }
}

/// Renders nothing until bootstrap settles, so no route decides on an
/// unknown session.
#[component]
fn Booted(children: ChildrenFn) -> impl IntoView {
    let phase = use_auth().phase;

    view! {
        <Show when=move || phase.get().is_ready()>
            {children()}
        </Show>
    }
}
