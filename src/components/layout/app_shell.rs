//! Page frame with the brand header, auth links and a build footer. Sign-out
//! here is best effort remotely and always clears the local session; the route
//! gate then moves a visitor on a protected page to sign-in.

use crate::{app_lib::GIT_COMMIT_HASH, features::auth::state::use_auth, routes::paths};
use leptos::{prelude::*, task::spawn_local};
use leptos_router::components::A;

const NAV_LINK: &str = "block py-2 px-3 text-gray-900 rounded hover:bg-gray-100 md:hover:bg-transparent md:p-0 md:hover:text-blue-700";

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated;
    let current_user = auth.current_user;

    let on_sign_out = move |_| {
        let auth = auth.clone();
        spawn_local(async move {
            auth.sign_out().await;
        });
    };

    let build = format!(
        "{} {} ({GIT_COMMIT_HASH})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="w-full bg-gray-50 border-b border-b-gray-200">
                <div class="w-full max-w-6xl mx-auto px-3 md:px-12 py-5 flex flex-row justify-between items-center">
                    <A href=paths::HOME {..} class="text-lg font-semibold">
                        "CrossBoxFit"
                    </A>
                    <ul class="flex flex-row items-center gap-6 text-sm font-medium">
                        <Show
                            when=move || is_authenticated.get()
                            fallback=|| {
                                view! {
                                    <li><A href=paths::SIGN_IN {..} class=NAV_LINK>"Sign In"</A></li>
                                    <li><A href=paths::SIGN_UP {..} class=NAV_LINK>"Sign Up"</A></li>
                                }
                            }
                        >
                            <li class="text-gray-500">
                                {move || current_user.get().map(|user| user.display_name())}
                            </li>
                            <li>
                                <button type="button" class=NAV_LINK on:click=on_sign_out.clone()>
                                    "Sign Out"
                                </button>
                            </li>
                        </Show>
                    </ul>
                </div>
            </header>
            <main class="flex-1">
                <div class="w-full max-w-6xl mx-auto p-4 mt-6">{children()}</div>
            </main>
            <footer class="py-4 text-center text-xs text-gray-400">
                {build}
            </footer>
        </div>
    }
}
