use crate::components::AppShell;
use crate::features::auth::state::use_auth;
use leptos::prelude::*;

/// Landing page of the protected region. Only rendered behind `RequireAuth`.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let current_user = auth.current_user;

    view! {
        <AppShell>
            {move || {
                current_user
                    .get()
                    .map(|user| {
                        view! {
                            <div class="max-w-lg mx-auto space-y-2">
                                <h1 class="text-2xl font-semibold text-gray-900">
                                    "Welcome, " {user.display_name()}
                                </h1>
                                <p class="text-sm text-gray-500">{user.email.clone()}</p>
                                {(!user.is_active)
                                    .then_some(view! {
                                        <p class="text-sm text-amber-600">
                                            "Your account is not activated yet. Check your email."
                                        </p>
                                    })}
                            </div>
                        }
                    })
            }}
        </AppShell>
    }
}
