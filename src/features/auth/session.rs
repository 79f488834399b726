//! Session store: the single source of truth for "who is signed in". The store
//! keeps every user it has fetched keyed by id and a pointer to the current one,
//! so repeated fetches of the same identity update in place.
//!
//! Invariant: when `current_user_id` is set, `users` holds an entry for it.
//! Locks are never held across an `.await`; overlapping refreshes race and the
//! last one to resolve wins.

use crate::{
    app_lib::AppError,
    features::auth::{
        client::IdentityApi,
        types::{SignInRequest, User, UserId},
    },
};
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct SessionCache {
    users: HashMap<UserId, User>,
    current_user_id: Option<UserId>,
}

/// Session state plus the transport used to synchronize it. Created once at
/// application start and handed to whatever needs it.
#[derive(Debug)]
pub struct SessionStore<A> {
    api: A,
    cache: RwLock<SessionCache>,
}

impl<A: IdentityApi> SessionStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: RwLock::new(SessionCache::default()),
        }
    }

    /// Transport for form-initiated calls (register, activate).
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetches the current user and makes it the session user.
    ///
    /// On failure an existing session is left untouched, so a transient error
    /// does not sign the user out.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn refresh_current_user(&self) -> Result<User, AppError> {
        match self.api.fetch_current_user().await {
            Ok(envelope) => {
                let user = envelope.user;
                self.set_current(user.clone());
                debug!(user_id = %user.id, "current user refreshed");
                Ok(user)
            }
            Err(err) => {
                debug!(error = %err, "current user refresh failed");
                Err(err)
            }
        }
    }

    /// Signs in, then refreshes so the session reflects the cookie the backend
    /// just issued.
    ///
    /// # Errors
    ///
    /// Returns the sign-in error, or the refresh error if the new cookie was not
    /// honored.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AppError> {
        let request = SignInRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let envelope = self.api.sign_in(&request).await?;
        debug!(user_id = %envelope.user.id, "sign-in accepted");

        let user = self.refresh_current_user().await?;
        info!(user_id = %user.id, "signed in");
        Ok(user)
    }

    /// Best-effort remote invalidation followed by an unconditional local clear.
    pub async fn sign_out(&self) {
        if let Err(err) = self.api.sign_out().await {
            warn!(error = %err, "sign-out request failed; clearing local session anyway");
        }
        self.clear_session();
        info!("signed out");
    }

    /// Current session user, without I/O.
    pub fn current_user(&self) -> Option<User> {
        let cache = self.read();
        cache
            .current_user_id
            .as_ref()
            .and_then(|id| cache.users.get(id))
            .cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().current_user_id.is_some()
    }

    /// Any user fetched during this session, current or not.
    #[cfg(test)]
    pub(crate) fn cached_user(&self, id: &UserId) -> Option<User> {
        self.read().users.get(id).cloned()
    }

    /// Drops the session pointer and the signed-out user's entry. Entries for
    /// other ids stay.
    pub fn clear_session(&self) {
        let mut cache = self.write();
        if let Some(id) = cache.current_user_id.take() {
            cache.users.remove(&id);
        }
    }

    fn set_current(&self, user: User) {
        let mut cache = self.write();
        let id = user.id.clone();
        cache.users.insert(id.clone(), user);
        cache.current_user_id = Some(id);
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionCache> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionCache> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn insert_cached(&self, user: User) {
        self.write().users.insert(user.id.clone(), user);
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{FakeApi, GatedApi};
    use super::*;
    use crate::features::auth::types::fixtures;
    use std::sync::{atomic::Ordering, Arc};

    fn network_down() -> AppError {
        AppError::Network("Unable to reach the server: connection refused".to_string())
    }

    #[tokio::test]
    async fn starts_absent() {
        let store = SessionStore::new(FakeApi::default());
        assert_eq!(store.current_user(), None);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn refresh_round_trips_user_through_cache() {
        let api = FakeApi::default();
        let user = fixtures::user("u-1", "ada@crossbox.fit");
        api.push_current(Ok(user.clone()));
        let store = SessionStore::new(api);

        let refreshed = store.refresh_current_user().await.expect("refresh");
        assert_eq!(refreshed, user);
        assert_eq!(store.current_user(), Some(user.clone()));
        assert_eq!(store.cached_user(&user.id), Some(user));
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn repeated_refresh_updates_entry_in_place() {
        let api = FakeApi::default();
        let first = fixtures::user("u-1", "ada@crossbox.fit");
        let mut second = first.clone();
        second.is_active = true;
        second.thumbnail = Some("https://cdn.crossbox.fit/ada.png".to_string());
        api.push_current(Ok(first));
        api.push_current(Ok(second.clone()));
        let store = SessionStore::new(api);

        store.refresh_current_user().await.expect("first refresh");
        store.refresh_current_user().await.expect("second refresh");
        assert_eq!(store.current_user(), Some(second));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_existing_session() {
        let api = FakeApi::default();
        let user = fixtures::user("u-1", "ada@crossbox.fit");
        api.push_current(Ok(user.clone()));
        api.push_current(Err(network_down()));
        let store = SessionStore::new(api);

        store.refresh_current_user().await.expect("first refresh");
        let err = store.refresh_current_user().await.expect_err("second refresh");
        assert!(err.is_network());
        assert_eq!(store.current_user(), Some(user));
    }

    #[tokio::test]
    async fn failed_refresh_without_session_stays_absent() {
        let api = FakeApi::default();
        api.push_current(Err(AppError::Auth { code: 401 }));
        let store = SessionStore::new(api);

        assert!(store.refresh_current_user().await.is_err());
        assert_eq!(store.current_user(), None);
    }

    #[tokio::test]
    async fn clear_session_is_absent_regardless_of_other_entries() {
        let api = FakeApi::default();
        let user = fixtures::user("u-1", "ada@crossbox.fit");
        let other = fixtures::user("u-2", "grace@crossbox.fit");
        api.push_current(Ok(user.clone()));
        let store = SessionStore::new(api);
        store.insert_cached(other.clone());

        store.refresh_current_user().await.expect("refresh");
        store.clear_session();

        assert_eq!(store.current_user(), None);
        assert!(!store.is_authenticated());
        assert_eq!(store.cached_user(&user.id), None);
        assert_eq!(store.cached_user(&other.id), Some(other));
    }

    #[tokio::test]
    async fn switching_identity_keeps_previous_entry() {
        let api = FakeApi::default();
        let ada = fixtures::user("u-1", "ada@crossbox.fit");
        let grace = fixtures::user("u-2", "grace@crossbox.fit");
        api.push_current(Ok(ada.clone()));
        api.push_current(Ok(grace.clone()));
        let store = SessionStore::new(api);

        store.refresh_current_user().await.expect("ada");
        store.refresh_current_user().await.expect("grace");

        assert_eq!(store.current_user(), Some(grace));
        assert_eq!(store.cached_user(&ada.id), Some(ada));
    }

    #[tokio::test]
    async fn sign_in_triggers_refresh() {
        let api = FakeApi::default();
        let user = fixtures::user("u-1", "ada@crossbox.fit");
        api.set_sign_in(Ok(user.clone()));
        api.push_current(Ok(user.clone()));
        let store = SessionStore::new(api);

        let signed_in = store
            .sign_in(" ada@crossbox.fit ", "pa55word")
            .await
            .expect("sign in");
        assert_eq!(signed_in, user);
        assert_eq!(store.api().fetches(), 1);
        assert_eq!(store.current_user(), Some(user));
    }

    #[tokio::test]
    async fn rejected_sign_in_leaves_session_absent() {
        let api = FakeApi::default();
        api.set_sign_in(Err(AppError::Auth { code: 401 }));
        let store = SessionStore::new(api);

        let err = store
            .sign_in("ada@crossbox.fit", "wrong")
            .await
            .expect_err("sign in");
        assert_eq!(err, AppError::Auth { code: 401 });
        assert_eq!(store.api().fetches(), 0);
        assert_eq!(store.current_user(), None);
    }

    #[tokio::test]
    async fn sign_out_clears_locally_even_when_backend_fails() {
        let api = FakeApi::default();
        api.push_current(Ok(fixtures::user("u-1", "ada@crossbox.fit")));
        api.fail_sign_out(network_down());
        let store = SessionStore::new(api);
        store.refresh_current_user().await.expect("refresh");

        store.sign_out().await;

        assert_eq!(store.api().sign_out_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.current_user(), None);
    }

    #[tokio::test]
    async fn overlapping_refreshes_last_to_resolve_wins() {
        let api = GatedApi::default();
        let earlier_gate = api.gate();
        let later_gate = api.gate();
        let store = Arc::new(SessionStore::new(api));

        let earlier = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.refresh_current_user().await }
        });
        while store.api().fetches() < 1 {
            tokio::task::yield_now().await;
        }
        let later = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.refresh_current_user().await }
        });
        while store.api().fetches() < 2 {
            tokio::task::yield_now().await;
        }

        let mut first = fixtures::user("u-1", "ada@crossbox.fit");
        first.first_name = "First".to_string();
        let mut second = first.clone();
        second.first_name = "Second".to_string();

        // The later request answers first.
        assert!(later_gate.send(Ok(second.clone())).is_ok());
        let resolved = later.await.expect("join").expect("later refresh");
        assert_eq!(resolved, second);
        assert_eq!(store.current_user(), Some(second));

        // The stale request lands afterwards and overwrites it.
        assert!(earlier_gate.send(Ok(first.clone())).is_ok());
        earlier.await.expect("join").expect("earlier refresh");
        assert_eq!(store.current_user(), Some(first.clone()));
        assert_eq!(store.cached_user(&first.id), Some(first));
    }
}
