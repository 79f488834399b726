//! Account activation. The user id comes from the emailed link; the token is
//! typed or pasted and normalized before it leaves the page.

use crate::{
    app_lib::AppError,
    components::{Alert, AlertKind, AppShell, Button, FormStatus, TextField},
    features::auth::{client::IdentityApi, state::use_auth, token::normalize_token},
    routes::paths,
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::{components::A, hooks::use_params_map};

#[component]
pub fn ActivatePage() -> impl IntoView {
    let auth = use_auth();
    let params = use_params_map();
    let user_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());
    let (raw_token, set_raw_token) = signal(String::new());
    let normalized = Memo::new(move |_| normalize_token(&raw_token.get()));
    let (error, set_error) = signal::<Option<AppError>>(None);

    let activate = Action::new_local(move |(user_id, token): &(String, String)| {
        let (user_id, token) = (user_id.clone(), token.clone());
        let auth = auth.clone();
        async move { auth.api().activate_account(&user_id, &token).await }
    });

    Effect::new(move |_| {
        if let Some(Err(err)) = activate.value().get() {
            set_error.set(Some(err));
        }
    });
    let activated = move || matches!(activate.value().get(), Some(Ok(())));

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let token = normalized.get_untracked();
        if token.is_empty() {
            set_error.set(Some(AppError::Validation {
                field: Some("token".to_string()),
                message: "is required".to_string(),
            }));
            return;
        }

        activate.dispatch((user_id.get_untracked(), token));
    };

    view! {
        <AppShell>
            <Show
                when=activated
                fallback=move || {
                    view! {
                        <form class="max-w-sm mx-auto" on:submit=on_submit>
                            <h1 class="mb-6 text-2xl font-semibold text-slate-900">
                                "Activate your account"
                            </h1>
                            <TextField
                                id="token"
                                label="Activation token"
                                autocomplete="one-time-code"
                                value=set_raw_token
                            />
                            <p class="-mt-3 mb-5 text-xs text-slate-500 font-mono tracking-widest">
                                {move || normalized.get()}
                            </p>
                            <Button button_type="submit" disabled=activate.pending()>
                                "Activate"
                            </Button>
                            <FormStatus pending=activate.pending() error=error />
                        </form>
                    }
                }
            >
                <div class="max-w-sm mx-auto space-y-4">
                    <Alert
                        kind=AlertKind::Success
                        message="Account activated. You can sign in now.".to_string()
                    />
                    <A href=paths::SIGN_IN {..} class="text-blue-700 hover:underline">"Sign in"</A>
                </div>
            </Show>
        </AppShell>
    }
}
