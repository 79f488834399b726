//! Route gate for the protected region. The decision is a pure function of the
//! boot proof and the current session; the Leptos guard below only turns a
//! `Redirect` into a one-time navigation.

use crate::{
    features::auth::{bootstrap::Ready, types::User},
    routes::paths,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Render(User),
    Redirect(&'static str),
}

/// Decides whether protected content may render. Never refreshes the session.
pub fn evaluate(_ready: Ready, current_user: Option<User>) -> GateDecision {
    match current_user {
        Some(user) => GateDecision::Render(user),
        None => GateDecision::Redirect(paths::SIGN_IN),
    }
}

#[cfg(target_arch = "wasm32")]
pub use view::RequireAuth;

#[cfg(target_arch = "wasm32")]
mod view {
    use super::{evaluate, GateDecision};
    use crate::features::auth::state::use_auth;
    use leptos::prelude::*;
    use leptos_router::{hooks::use_navigate, NavigateOptions};

    /// Renders children only for a signed-in session; otherwise replaces the
    /// current history entry with the sign-in page and renders nothing.
    #[component]
    pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
        let auth = use_auth();
        let navigate = use_navigate();
        let redirected = StoredValue::new(false);

        let decision = Memo::new(move |_| {
            auth.phase
                .get()
                .ready()
                .map(|ready| evaluate(ready, auth.current_user.get()))
        });

        Effect::new(move |_| {
            if let Some(GateDecision::Redirect(target)) = decision.get() {
                if !redirected.get_value() {
                    redirected.set_value(true);
                    // UX-only guard; the backend still rejects requests without a session.
                    navigate(
                        target,
                        NavigateOptions {
                            replace: true,
                            ..Default::default()
                        },
                    );
                }
            }
        });

        move || match decision.get() {
            Some(GateDecision::Render(_)) => children().into_any(),
            _ => ().into_any(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::{
        bootstrap::bootstrap,
        session::{fake::FakeApi, SessionStore},
        types::fixtures,
    };

    #[tokio::test]
    async fn absent_session_redirects_to_sign_in() {
        let store = SessionStore::new(FakeApi::default());
        let ready = bootstrap(&store).await;

        assert_eq!(
            evaluate(ready, store.current_user()),
            GateDecision::Redirect("/auth")
        );
    }

    #[tokio::test]
    async fn present_session_renders_without_redirect() {
        let api = FakeApi::default();
        let user = fixtures::user("u-1", "ada@crossbox.fit");
        api.push_current(Ok(user.clone()));
        let store = SessionStore::new(api);
        let ready = bootstrap(&store).await;

        assert_eq!(
            evaluate(ready, store.current_user()),
            GateDecision::Render(user)
        );
    }

    #[tokio::test]
    async fn gate_does_not_refresh() {
        let store = SessionStore::new(FakeApi::default());
        let ready = bootstrap(&store).await;
        let fetches = store.api().fetches();

        for _ in 0..3 {
            let _ = evaluate(ready, store.current_user());
        }
        assert_eq!(store.api().fetches(), fetches);
    }

    #[tokio::test]
    async fn sign_in_then_gate_renders() {
        let api = FakeApi::default();
        let user = fixtures::user("u-1", "ada@crossbox.fit");
        let store = SessionStore::new(api);

        let ready = bootstrap(&store).await;
        assert!(matches!(
            evaluate(ready, store.current_user()),
            GateDecision::Redirect(_)
        ));

        store.api().set_sign_in(Ok(user.clone()));
        store.api().push_current(Ok(user.clone()));
        store
            .sign_in("ada@crossbox.fit", "pa55word")
            .await
            .expect("sign in");

        assert_eq!(store.current_user(), Some(user.clone()));
        assert_eq!(
            evaluate(ready, store.current_user()),
            GateDecision::Render(user)
        );
    }

    #[tokio::test]
    async fn sign_out_closes_the_gate() {
        let api = FakeApi::default();
        api.push_current(Ok(fixtures::user("u-1", "ada@crossbox.fit")));
        let store = SessionStore::new(api);
        let ready = bootstrap(&store).await;

        store.sign_out().await;

        assert_eq!(
            evaluate(ready, store.current_user()),
            GateDecision::Redirect(paths::SIGN_IN)
        );
    }
}
