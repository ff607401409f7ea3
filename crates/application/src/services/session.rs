//! Client session state machine
//!
//! ```text
//! Unauthenticated --login--> Resolving --identity ok--> Authenticated(role)
//!        ^                       |                             |
//!        +---- logout / 401 -----+-----------------------------+
//! ```
//!
//! [`SessionHandle`] is the only owner of the credential, the cached
//! identity and the published [`SessionState`]. Everything else (the HTTP
//! gateway, the route guard, the CLI) reads through it. [`SessionService`]
//! drives the transitions that need the backend.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use domain::{Role, User};
use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{IdentityPort, SessionSnapshot, SessionStorePort};

/// Minutes of inactivity after which a persisted session is discarded
pub const DEFAULT_IDLE_TIMEOUT_MINUTES: i64 = 30;

/// Published authentication state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "role", rename_all = "snake_case")]
pub enum SessionState {
    /// No credential
    Unauthenticated,
    /// Credential present, identity not (yet) confirmed
    Resolving,
    /// Identity confirmed with the given role
    Authenticated(Role),
}

impl SessionState {
    /// Role, once resolved
    pub const fn role(&self) -> Option<Role> {
        match self {
            Self::Authenticated(role) => Some(*role),
            Self::Unauthenticated | Self::Resolving => None,
        }
    }

    /// Identity confirmed
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => f.write_str("unauthenticated"),
            Self::Resolving => f.write_str("resolving"),
            Self::Authenticated(role) => write!(f, "authenticated as {role}"),
        }
    }
}

#[derive(Default)]
struct SessionInner {
    credential: Option<SecretString>,
    username: Option<String>,
    role: Option<Role>,
    identity: Option<User>,
    last_activity: Option<DateTime<Utc>>,
}

impl SessionInner {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            token: self
                .credential
                .as_ref()
                .map(|credential| credential.expose_secret().to_owned()),
            username: self.username.clone(),
            role: self.role,
            last_activity: self.last_activity,
        }
    }
}

/// Shared owner of the client session
///
/// Memory and store are updated together under a write lock so a 401
/// arriving mid-resolution cannot be overwritten by a stale identity.
pub struct SessionHandle {
    store: Arc<dyn SessionStorePort>,
    inner: RwLock<SessionInner>,
    writes: Mutex<()>,
    state: watch::Sender<SessionState>,
    idle_timeout: Duration,
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("state", &self.state())
            .field("username", &self.inner.read().username)
            .field("idle_timeout", &self.idle_timeout)
            .finish_non_exhaustive()
    }
}

impl SessionHandle {
    /// Create an empty handle backed by `store`
    ///
    /// Call [`restore`](Self::restore) to load persisted state.
    pub fn new(store: Arc<dyn SessionStorePort>, idle_timeout: Duration) -> Self {
        let (state, _) = watch::channel(SessionState::Unauthenticated);
        Self {
            store,
            inner: RwLock::new(SessionInner::default()),
            writes: Mutex::new(()),
            state,
            idle_timeout,
        }
    }

    /// Load the persisted snapshot
    ///
    /// A snapshot idle for longer than the configured timeout is removed
    /// from the store. A restored credential leaves the session
    /// `Resolving` until the identity is confirmed.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Result<SessionState, ApplicationError> {
        let _write = self.writes.lock().await;
        let snapshot = self.store.load().await?;

        if snapshot.is_idle(Utc::now(), self.idle_timeout) {
            info!("Discarding idle session");
            *self.inner.write() = SessionInner::default();
            self.store.clear().await?;
            return Ok(self.publish(SessionState::Unauthenticated));
        }

        let state = if snapshot.token.is_some() {
            SessionState::Resolving
        } else {
            SessionState::Unauthenticated
        };
        {
            let mut inner = self.inner.write();
            inner.credential = snapshot.token.map(SecretString::from);
            inner.username = snapshot.username;
            inner.role = snapshot.role;
            inner.identity = None;
            inner.last_activity = snapshot.last_activity;
        }
        debug!(%state, "Session restored");
        Ok(self.publish(state))
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// A credential is held
    pub fn has_credential(&self) -> bool {
        self.inner.read().credential.is_some()
    }

    /// Credential to send as `Authorization: Bearer`
    pub fn bearer_token(&self) -> Option<String> {
        self.inner
            .read()
            .credential
            .as_ref()
            .map(|credential| credential.expose_secret().to_owned())
    }

    /// Username the credential was issued for
    pub fn username(&self) -> Option<String> {
        self.inner.read().username.clone()
    }

    /// Last role seen, possibly from a previous run
    ///
    /// Advisory only; the backend enforces authorization.
    pub fn cached_role(&self) -> Option<Role> {
        self.inner.read().role
    }

    /// Identity confirmed during this run
    pub fn identity(&self) -> Option<User> {
        self.inner.read().identity.clone()
    }

    /// Clear credential, username, role and identity atomically
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), ApplicationError> {
        let _write = self.writes.lock().await;
        *self.inner.write() = SessionInner::default();
        self.publish(SessionState::Unauthenticated);
        self.store.clear().await
    }

    /// Clear the session only if `refused` is still the held credential
    ///
    /// Returns `false` when the session holds no credential or a newer
    /// one, which is then left in place.
    #[instrument(skip_all)]
    pub async fn clear_if_current(&self, refused: &str) -> Result<bool, ApplicationError> {
        let _write = self.writes.lock().await;
        {
            let mut inner = self.inner.write();
            let current = inner
                .credential
                .as_ref()
                .is_some_and(|credential| credential.expose_secret() == refused);
            if !current {
                return Ok(false);
            }
            *inner = SessionInner::default();
        }
        self.publish(SessionState::Unauthenticated);
        self.store.clear().await?;
        Ok(true)
    }

    pub(crate) async fn store_credential(
        &self,
        credential: SecretString,
        username: String,
    ) -> Result<(), ApplicationError> {
        let _write = self.writes.lock().await;
        let snapshot = {
            let mut inner = self.inner.write();
            inner.credential = Some(credential);
            inner.username = Some(username);
            inner.role = None;
            inner.identity = None;
            inner.last_activity = Some(Utc::now());
            inner.snapshot()
        };
        self.publish(SessionState::Resolving);
        self.store.save(&snapshot).await
    }

    pub(crate) async fn store_identity(
        &self,
        user: User,
    ) -> Result<SessionState, ApplicationError> {
        let _write = self.writes.lock().await;
        let snapshot = {
            let mut inner = self.inner.write();
            if inner.credential.is_none() {
                // cleared while the lookup was in flight
                return Ok(SessionState::Unauthenticated);
            }
            inner.role = Some(user.role);
            inner.identity = Some(user);
            inner.last_activity = Some(Utc::now());
            inner.snapshot()
        };
        self.store.save(&snapshot).await?;
        let state = snapshot
            .role
            .map_or(SessionState::Resolving, SessionState::Authenticated);
        Ok(self.publish(state))
    }

    pub(crate) async fn drop_identity(&self) -> Result<SessionState, ApplicationError> {
        let _write = self.writes.lock().await;
        let snapshot = {
            let mut inner = self.inner.write();
            inner.role = None;
            inner.identity = None;
            inner.snapshot()
        };
        let state = if snapshot.token.is_some() {
            SessionState::Resolving
        } else {
            SessionState::Unauthenticated
        };
        self.store.save(&snapshot).await?;
        Ok(self.publish(state))
    }

    pub(crate) fn begin_resolving(&self) {
        self.publish(SessionState::Resolving);
    }

    pub(crate) fn mark_unauthenticated(&self) -> SessionState {
        {
            let mut inner = self.inner.write();
            inner.role = None;
            inner.identity = None;
        }
        self.publish(SessionState::Unauthenticated)
    }

    fn publish(&self, state: SessionState) -> SessionState {
        self.state.send_replace(state);
        state
    }
}

/// Session use cases over a [`SessionHandle`] and an [`IdentityPort`]
pub struct SessionService {
    handle: Arc<SessionHandle>,
    identity: Arc<dyn IdentityPort>,
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl SessionService {
    /// Create the service
    pub fn new(handle: Arc<SessionHandle>, identity: Arc<dyn IdentityPort>) -> Self {
        Self { handle, identity }
    }

    /// Underlying handle
    pub const fn handle(&self) -> &Arc<SessionHandle> {
        &self.handle
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.handle.state()
    }

    /// Resolve the identity for the stored credential
    ///
    /// A refused credential clears the session and yields
    /// `Unauthenticated`. Any other failure drops the cached identity but
    /// keeps the credential, leaves the session `Resolving` and is
    /// returned to the caller.
    #[instrument(skip(self))]
    pub async fn establish(&self) -> Result<SessionState, ApplicationError> {
        if !self.handle.has_credential() {
            debug!("No stored credential");
            return Ok(self.handle.mark_unauthenticated());
        }
        self.handle.begin_resolving();
        self.resolve_identity().await
    }

    /// Authenticate and resolve the new identity
    ///
    /// A refused login leaves persisted state untouched. Once a credential
    /// is issued, an identity lookup failure is logged and the session
    /// stays `Resolving`; only a refused credential fails the login.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SessionState, ApplicationError> {
        let issued = self
            .identity
            .authenticate(username, password)
            .await
            .inspect_err(|e| warn!(error = %e, "Login refused"))?;

        info!(username = %issued.username, "Credential issued");
        self.handle
            .store_credential(issued.access_token, issued.username)
            .await?;

        match self.resolve_identity().await {
            Ok(SessionState::Unauthenticated) => Err(ApplicationError::Unauthorized(
                "credential refused right after login".to_string(),
            )),
            Ok(state) => Ok(state),
            Err(e) => {
                warn!(error = %e, "Logged in but identity could not be resolved");
                Ok(self.handle.state())
            },
        }
    }

    /// Forget the session locally; the backend is not contacted
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApplicationError> {
        self.handle.clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// React to a refused credential from any backend call
    #[instrument(skip(self))]
    pub async fn invalidate(&self) -> Result<(), ApplicationError> {
        warn!("Credential refused by backend, clearing session");
        self.handle.clear().await
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.handle.subscribe()
    }

    async fn resolve_identity(&self) -> Result<SessionState, ApplicationError> {
        match self.identity.current_user().await {
            Ok(user) => {
                let state = self.handle.store_identity(user).await?;
                info!(%state, "Identity resolved");
                Ok(state)
            },
            Err(e) if e.is_unauthorized() => {
                warn!("Credential refused, clearing session");
                self.handle.clear().await?;
                Ok(SessionState::Unauthenticated)
            },
            Err(e) => {
                warn!(error = %e, "Identity lookup failed");
                self.handle.drop_identity().await?;
                Err(e)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{IssuedCredential, MockIdentityPort};
    use crate::services::test_support::{MemoryStore, user_with_role};

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn issuing(
        token: &'static str,
    ) -> impl Fn(&str, &SecretString) -> Result<IssuedCredential, ApplicationError> + Send + 'static
    {
        move |username: &str, _: &SecretString| {
            Ok(IssuedCredential {
                access_token: secret(token),
                username: username.to_string(),
                user_id: Some(1),
            })
        }
    }

    async fn service(store: Arc<MemoryStore>, identity: MockIdentityPort) -> SessionService {
        let handle = Arc::new(SessionHandle::new(
            store,
            Duration::minutes(DEFAULT_IDLE_TIMEOUT_MINUTES),
        ));
        handle.restore().await.unwrap();
        SessionService::new(handle, Arc::new(identity))
    }

    #[tokio::test]
    async fn establish_without_credential_skips_backend() {
        let store = Arc::new(MemoryStore::default());
        let session = service(store, MockIdentityPort::new()).await;

        let state = session.establish().await.unwrap();
        assert_eq!(state, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn login_persists_token_and_role() {
        let store = Arc::new(MemoryStore::default());
        let mut identity = MockIdentityPort::new();
        identity
            .expect_authenticate()
            .withf(|username, _| username == "alice")
            .returning(issuing("tok-1"));
        identity
            .expect_current_user()
            .returning(|| Ok(user_with_role("alice", Role::Engineer)));

        let session = service(Arc::clone(&store), identity).await;
        let state = session.login("alice", &secret("secret")).await.unwrap();

        assert_eq!(state, SessionState::Authenticated(Role::Engineer));
        let persisted = store.snapshot();
        assert_eq!(persisted.token.as_deref(), Some("tok-1"));
        assert_eq!(persisted.username.as_deref(), Some("alice"));
        assert_eq!(persisted.role, Some(Role::Engineer));
        assert!(persisted.last_activity.is_some());
        assert_eq!(session.handle().bearer_token().as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn refused_login_leaves_store_untouched() {
        let store = Arc::new(MemoryStore::with(SessionSnapshot {
            username: Some("bob".to_string()),
            ..SessionSnapshot::default()
        }));
        let mut identity = MockIdentityPort::new();
        identity.expect_authenticate().returning(|_, _| {
            Err(ApplicationError::Unauthorized(
                "Incorrect username or password".to_string(),
            ))
        });

        let session = service(Arc::clone(&store), identity).await;
        let err = session.login("alice", &secret("wrong")).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(store.snapshot().username.as_deref(), Some("bob"));
        assert_eq!(store.saves(), 0);
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn login_survives_identity_outage() {
        let store = Arc::new(MemoryStore::default());
        let mut identity = MockIdentityPort::new();
        identity.expect_authenticate().returning(issuing("tok-2"));
        identity
            .expect_current_user()
            .returning(|| Err(ApplicationError::ExternalService("connection refused".into())));

        let session = service(Arc::clone(&store), identity).await;
        let state = session.login("alice", &secret("secret")).await.unwrap();

        assert_eq!(state, SessionState::Resolving);
        assert_eq!(store.snapshot().token.as_deref(), Some("tok-2"));
        assert_eq!(store.snapshot().role, None);
    }

    #[tokio::test]
    async fn login_fails_when_new_credential_refused() {
        let store = Arc::new(MemoryStore::default());
        let mut identity = MockIdentityPort::new();
        identity.expect_authenticate().returning(issuing("tok-3"));
        identity
            .expect_current_user()
            .returning(|| Err(ApplicationError::Unauthorized("expired".into())));

        let session = service(Arc::clone(&store), identity).await;
        let err = session.login("alice", &secret("secret")).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(store.snapshot().is_empty());
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn establish_clears_everything_on_refusal() {
        let store = Arc::new(MemoryStore::with(SessionSnapshot {
            token: Some("stale".to_string()),
            username: Some("alice".to_string()),
            role: Some(Role::Admin),
            last_activity: Some(Utc::now()),
        }));
        let mut identity = MockIdentityPort::new();
        identity
            .expect_current_user()
            .returning(|| Err(ApplicationError::Unauthorized("expired".into())));

        let session = service(Arc::clone(&store), identity).await;
        let state = session.establish().await.unwrap();

        assert_eq!(state, SessionState::Unauthenticated);
        assert!(store.snapshot().is_empty());
        assert!(session.handle().bearer_token().is_none());
        assert!(session.handle().username().is_none());
        assert!(session.handle().cached_role().is_none());
    }

    #[tokio::test]
    async fn establish_transport_failure_keeps_credential() {
        let store = Arc::new(MemoryStore::with(SessionSnapshot {
            token: Some("tok".to_string()),
            username: Some("alice".to_string()),
            role: Some(Role::Engineer),
            last_activity: Some(Utc::now()),
        }));
        let mut identity = MockIdentityPort::new();
        identity
            .expect_current_user()
            .returning(|| Err(ApplicationError::ExternalService("timed out".into())));

        let session = service(Arc::clone(&store), identity).await;
        let err = session.establish().await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(session.state(), SessionState::Resolving);
        assert_eq!(store.snapshot().token.as_deref(), Some("tok"));
        assert_eq!(store.snapshot().role, None);
        assert!(session.handle().cached_role().is_none());
    }

    #[tokio::test]
    async fn logout_then_establish_is_unauthenticated() {
        let store = Arc::new(MemoryStore::with(SessionSnapshot {
            token: Some("tok".to_string()),
            username: Some("alice".to_string()),
            role: Some(Role::User),
            last_activity: Some(Utc::now()),
        }));
        let session = service(Arc::clone(&store), MockIdentityPort::new()).await;

        session.logout().await.unwrap();
        let state = session.establish().await.unwrap();

        assert_eq!(state, SessionState::Unauthenticated);
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn idle_snapshot_is_discarded_on_restore() {
        let store = Arc::new(MemoryStore::with(SessionSnapshot {
            token: Some("old".to_string()),
            username: Some("alice".to_string()),
            role: Some(Role::User),
            last_activity: Some(Utc::now() - Duration::minutes(45)),
        }));
        let session = service(Arc::clone(&store), MockIdentityPort::new()).await;

        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert!(!session.handle().has_credential());
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn restored_credential_starts_resolving() {
        let store = Arc::new(MemoryStore::with(SessionSnapshot {
            token: Some("tok".to_string()),
            username: Some("alice".to_string()),
            role: Some(Role::Admin),
            last_activity: Some(Utc::now()),
        }));
        let session = service(store, MockIdentityPort::new()).await;

        assert_eq!(session.state(), SessionState::Resolving);
        assert_eq!(session.handle().cached_role(), Some(Role::Admin));
    }

    #[tokio::test]
    async fn subscribers_see_resolution() {
        let store = Arc::new(MemoryStore::default());
        let mut identity = MockIdentityPort::new();
        identity.expect_authenticate().returning(issuing("tok"));
        identity
            .expect_current_user()
            .returning(|| Ok(user_with_role("carol", Role::Admin)));

        let session = service(store, identity).await;
        let mut rx = session.subscribe();
        session.login("carol", &secret("pw")).await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(
            *rx.borrow_and_update(),
            SessionState::Authenticated(Role::Admin)
        );
    }

    #[tokio::test]
    async fn invalidate_clears_role_and_username() {
        let store = Arc::new(MemoryStore::with(SessionSnapshot {
            token: Some("tok".to_string()),
            username: Some("alice".to_string()),
            role: Some(Role::Engineer),
            last_activity: Some(Utc::now()),
        }));
        let session = service(Arc::clone(&store), MockIdentityPort::new()).await;

        session.invalidate().await.unwrap();

        assert!(store.snapshot().is_empty());
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert!(session.handle().username().is_none());
    }

    #[tokio::test]
    async fn refusal_of_older_credential_keeps_newer_login() {
        let store = Arc::new(MemoryStore::with(SessionSnapshot {
            token: Some("old".to_string()),
            username: Some("alice".to_string()),
            role: Some(Role::User),
            last_activity: Some(Utc::now()),
        }));
        let mut identity = MockIdentityPort::new();
        identity.expect_authenticate().returning(issuing("new"));
        identity
            .expect_current_user()
            .returning(|| Ok(user_with_role("alice", Role::Engineer)));
        let session = service(Arc::clone(&store), identity).await;
        session.login("alice", &secret("pw")).await.unwrap();

        let cleared = session.handle().clear_if_current("old").await.unwrap();

        assert!(!cleared);
        assert_eq!(session.handle().bearer_token().as_deref(), Some("new"));
        assert_eq!(session.state(), SessionState::Authenticated(Role::Engineer));
        assert_eq!(store.snapshot().token.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn refusal_of_current_credential_clears_session() {
        let store = Arc::new(MemoryStore::with(SessionSnapshot {
            token: Some("tok".to_string()),
            username: Some("alice".to_string()),
            role: Some(Role::Admin),
            last_activity: Some(Utc::now()),
        }));
        let session = service(Arc::clone(&store), MockIdentityPort::new()).await;

        assert!(session.handle().clear_if_current("tok").await.unwrap());
        assert!(!session.handle().has_credential());
        assert!(session.handle().cached_role().is_none());
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert!(store.snapshot().is_empty());
        assert!(!session.handle().clear_if_current("tok").await.unwrap());
    }

    #[test]
    fn state_display() {
        assert_eq!(SessionState::Resolving.to_string(), "resolving");
        assert_eq!(
            SessionState::Authenticated(Role::Engineer).to_string(),
            "authenticated as engineer"
        );
        assert_eq!(SessionState::Authenticated(Role::User).role(), Some(Role::User));
        assert!(!SessionState::Unauthenticated.is_authenticated());
    }
}
