//! Startup sequencing. The application is `Booting` until one session refresh
//! has settled, then `Ready`. The route gate needs a [`Ready`] value, and the
//! only way to get one is to run [`bootstrap`], so the gate cannot decide
//! anything while the session is still unknown.

use crate::features::auth::{client::IdentityApi, session::SessionStore};
use tracing::{debug, info};

/// Proof that the startup refresh has settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ready {
    _sealed: (),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BootPhase {
    #[default]
    Booting,
    Ready(Ready),
}

impl BootPhase {
    pub fn ready(self) -> Option<Ready> {
        match self {
            BootPhase::Booting => None,
            BootPhase::Ready(ready) => Some(ready),
        }
    }

    pub fn is_ready(self) -> bool {
        self.ready().is_some()
    }
}

/// Tries to restore the session from the backend cookie. Never fails: any
/// error leaves the visitor signed out.
pub async fn bootstrap<A: IdentityApi>(store: &SessionStore<A>) -> Ready {
    match store.refresh_current_user().await {
        Ok(user) => info!(user_id = %user.id, "session restored"),
        Err(err) => {
            debug!(error = %err, "no session restored; continuing signed out");
            store.clear_session();
        }
    }

    Ready { _sealed: () }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_lib::AppError;
    use crate::features::auth::{session::fake::FakeApi, types::fixtures};

    #[test]
    fn phase_starts_booting() {
        let phase = BootPhase::default();
        assert_eq!(phase, BootPhase::Booting);
        assert!(!phase.is_ready());
        assert_eq!(phase.ready(), None);
    }

    #[tokio::test]
    async fn restores_session_from_cookie() {
        let api = FakeApi::default();
        let user = fixtures::user("u-1", "ada@crossbox.fit");
        api.push_current(Ok(user.clone()));
        let store = SessionStore::new(api);

        let ready = bootstrap(&store).await;

        assert_eq!(BootPhase::Ready(ready).ready(), Some(ready));
        assert_eq!(store.current_user(), Some(user));
        assert_eq!(store.api().fetches(), 1);
    }

    #[tokio::test]
    async fn network_failure_reaches_ready_signed_out() {
        let api = FakeApi::default();
        api.push_current(Err(AppError::Network("connection refused".to_string())));
        let store = SessionStore::new(api);

        let ready = bootstrap(&store).await;

        assert!(BootPhase::Ready(ready).is_ready());
        assert_eq!(store.current_user(), None);
    }

    #[tokio::test]
    async fn every_error_kind_is_swallowed() {
        let errors = [
            AppError::Auth { code: 401 },
            AppError::Timeout("slow".to_string()),
            AppError::Validation {
                field: None,
                message: "invalid cookie".to_string(),
            },
            AppError::Http {
                status: 500,
                message: "boom".to_string(),
            },
            AppError::Parse("garbage".to_string()),
        ];

        for err in errors {
            let api = FakeApi::default();
            api.push_current(Err(err));
            let store = SessionStore::new(api);

            bootstrap(&store).await;
            assert!(!store.is_authenticated());
        }
    }
}
