//! Sign-in route. A successful sign-in refreshes the session store before
//! navigating home, so the route gate already sees the user.

use crate::{
    app_lib::AppError,
    components::{AppShell, Button, FormStatus, TextField},
    features::auth::state::use_auth,
    routes::paths,
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::{components::A, hooks::use_navigate};

#[component]
pub fn SignInPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);

    let sign_in = Action::new_local(move |(email, password): &(String, String)| {
        let (email, password) = (email.clone(), password.clone());
        let auth = auth.clone();
        async move { auth.sign_in(&email, &password).await }
    });

    Effect::new(move |_| match sign_in.value().get() {
        Some(Ok(_)) => navigate(paths::HOME, Default::default()),
        Some(Err(err)) => set_error.set(Some(err)),
        None => {}
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let email = email.get_untracked().trim().to_string();
        let password = password.get_untracked();
        if email.is_empty() || password.is_empty() {
            set_error.set(Some(AppError::Validation {
                field: None,
                message: "Email and password are required.".to_string(),
            }));
            return;
        }

        sign_in.dispatch((email, password));
    };

    view! {
        <AppShell>
            <form class="max-w-sm mx-auto" on:submit=on_submit>
                <h1 class="mb-6 text-2xl font-semibold text-slate-900">"Sign in"</h1>
                <TextField
                    id="email"
                    label="Email"
                    input_type="email"
                    autocomplete="email"
                    placeholder="name@crossbox.fit"
                    value=set_email
                />
                <TextField
                    id="password"
                    label="Password"
                    input_type="password"
                    autocomplete="current-password"
                    value=set_password
                />
                <Button button_type="submit" disabled=sign_in.pending()>
                    "Sign In"
                </Button>
                <FormStatus pending=sign_in.pending() error=error />
                <p class="mt-4 text-sm text-slate-600">
                    "No account yet? "
                    <A href=paths::SIGN_UP {..} class="text-blue-700 hover:underline">
                        "Create one"
                    </A>
                </p>
            </form>
        </AppShell>
    }
}
