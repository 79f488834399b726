//! Auth session context for the browser. The provider owns the one
//! [`SessionStore`] for the page, runs bootstrap once on mount, and mirrors the
//! store's current user into a signal so views re-render when it changes.
//! Only non-sensitive user metadata lives in memory; cookies remain `HttpOnly`.

use crate::{
    app_lib::AppError,
    features::auth::{
        bootstrap::{bootstrap, BootPhase},
        client::BrowserIdentityClient,
        session::SessionStore,
        types::User,
    },
};
use leptos::{prelude::*, task::spawn_local};
use std::sync::Arc;

/// Auth session context shared through Leptos.
#[derive(Clone)]
pub struct AuthContext {
    store: Arc<SessionStore<BrowserIdentityClient>>,
    pub current_user: RwSignal<Option<User>>,
    pub phase: RwSignal<BootPhase>,
    pub is_authenticated: Signal<bool>,
}

impl AuthContext {
    fn new(store: Arc<SessionStore<BrowserIdentityClient>>) -> Self {
        let current_user = RwSignal::new(store.current_user());
        let is_authenticated = Signal::derive(move || current_user.get().is_some());
        Self {
            store,
            current_user,
            phase: RwSignal::new(BootPhase::Booting),
            is_authenticated,
        }
    }

    pub fn api(&self) -> &BrowserIdentityClient {
        self.store.api()
    }

    /// Signs in through the store and publishes the refreshed user.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AppError> {
        let result = self.store.sign_in(email, password).await;
        self.sync();
        result
    }

    /// Signs out; the local session is cleared whatever the backend answers.
    pub async fn sign_out(&self) {
        self.store.sign_out().await;
        self.sync();
    }

    fn sync(&self) {
        self.current_user.set(self.store.current_user());
    }
}

/// Provides auth context and runs the bootstrap sequence once on mount.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let store = Arc::new(SessionStore::new(BrowserIdentityClient));
    let auth = AuthContext::new(store);
    provide_context(auth.clone());

    spawn_local(async move {
        let ready = bootstrap(&auth.store).await;
        auth.sync();
        auth.phase.set(BootPhase::Ready(ready));
    });

    view! { {children()} }
}

/// Returns the auth context provided by [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
