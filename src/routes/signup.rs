//! Sign-up route. Fields go to the backend as typed; the backend owns
//! validation and emails an activation token on success. Only emptiness is
//! checked locally so the form never submits blanks.

use crate::{
    app_lib::AppError,
    components::{Alert, AlertKind, AppShell, Button, FormStatus, TextField},
    features::auth::{client::IdentityApi, state::use_auth, types::RegisterRequest},
    routes::paths,
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::components::A;

#[component]
pub fn SignUpPage() -> impl IntoView {
    let auth = use_auth();
    let (email, set_email) = signal(String::new());
    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);

    let register = Action::new_local(move |request: &RegisterRequest| {
        let request = request.clone();
        let auth = auth.clone();
        async move { auth.api().register(&request).await }
    });

    Effect::new(move |_| {
        if let Some(Err(err)) = register.value().get() {
            set_error.set(Some(err));
        }
    });
    let registered = move || matches!(register.value().get(), Some(Ok(())));

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let request = RegisterRequest {
            email: email.get_untracked(),
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            password: password.get_untracked(),
        };
        let blank = [&request.email, &request.first_name, &request.last_name]
            .iter()
            .any(|value| value.trim().is_empty());
        if blank || request.password.is_empty() {
            set_error.set(Some(AppError::Validation {
                field: None,
                message: "All fields are required.".to_string(),
            }));
            return;
        }

        register.dispatch(request);
    };

    view! {
        <AppShell>
            <Show
                when=registered
                fallback=move || {
                    view! {
                        <form class="max-w-sm mx-auto" on:submit=on_submit>
                            <h1 class="mb-6 text-2xl font-semibold text-slate-900">
                                "Create your account"
                            </h1>
                            <TextField
                                id="email"
                                label="Email"
                                input_type="email"
                                autocomplete="email"
                                value=set_email
                            />
                            <TextField
                                id="first_name"
                                label="First name"
                                autocomplete="given-name"
                                value=set_first_name
                            />
                            <TextField
                                id="last_name"
                                label="Last name"
                                autocomplete="family-name"
                                value=set_last_name
                            />
                            <TextField
                                id="password"
                                label="Password"
                                input_type="password"
                                autocomplete="new-password"
                                value=set_password
                            />
                            <Button button_type="submit" disabled=register.pending()>
                                "Sign Up"
                            </Button>
                            <FormStatus pending=register.pending() error=error />
                            <p class="mt-4 text-sm text-slate-600">
                                "Already registered? "
                                <A href=paths::SIGN_IN {..} class="text-blue-700 hover:underline">
                                    "Sign in"
                                </A>
                            </p>
                        </form>
                    }
                }
            >
                <div class="max-w-sm mx-auto">
                    <Alert
                        kind=AlertKind::Success
                        message="Check your email for the activation link and token.".to_string()
                    />
                </div>
            </Show>
        </AppShell>
    }
}
