use crate::components::AppShell;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <AppShell>
            <div class="max-w-sm mx-auto text-center space-y-4">
                <h1 class="text-2xl font-semibold text-gray-900">"Page not found"</h1>
                <A href=paths::HOME {..} class="text-blue-700 hover:underline">"Back home"</A>
            </div>
        </AppShell>
    }
}
