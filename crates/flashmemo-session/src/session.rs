//! Session management over an explicit state machine.
//!
//! `SessionManager` owns the in-memory user, drives the FSM, persists the
//! session records through [`CredentialStore`], and keeps the shared client's
//! bearer credential in step with the signed-in user.

use crate::auth_fsm::{
    SessionMachine, SessionMachineInput, SessionState, SessionStateChangedPayload,
};
use crate::backend::{AuthBackend, CredentialAttachment};
use crate::persistence::CredentialStore;
use crate::{AuthError, AuthResult};
use flashmemo_api::{ApiClient, ApiResult, AuthSession, User};
use flashmemo_storage::{KeyValueStorage, StorageResult};
use parking_lot::{Mutex, RwLock};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Callback type for session state change notifications.
pub type SessionStateCallback = Box<dyn Fn(SessionStateChangedPayload) + Send + Sync>;

/// FSM inputs for one authentication flavour.
struct AuthInputs {
    attempt: SessionMachineInput,
    success: SessionMachineInput,
    failed: SessionMachineInput,
}

const SIGN_IN: AuthInputs = AuthInputs {
    attempt: SessionMachineInput::SignInAttempt,
    success: SessionMachineInput::SignInSuccess,
    failed: SessionMachineInput::SignInFailed,
};

const SIGN_UP: AuthInputs = AuthInputs {
    attempt: SessionMachineInput::SignUpAttempt,
    success: SessionMachineInput::SignUpSuccess,
    failed: SessionMachineInput::SignUpFailed,
};

/// The client's session.
///
/// `sign_in`, `sign_up`, `sign_out` and `restore` are serialized: a call made
/// while another is in flight waits for it to finish.
pub struct SessionManager {
    store: CredentialStore,
    backend: Arc<dyn AuthBackend>,
    credentials: Arc<dyn CredentialAttachment>,
    fsm: Mutex<SessionMachine>,
    current_user: RwLock<Option<User>>,
    op_lock: tokio::sync::Mutex<()>,
    state_callback: Mutex<Option<Arc<dyn Fn(SessionStateChangedPayload) + Send + Sync>>>,
}

impl SessionManager {
    /// Create a session in `Restoring` with no user. Call [`restore`](Self::restore)
    /// next, or use [`bootstrap`](Self::bootstrap).
    pub fn new(
        store: CredentialStore,
        backend: Arc<dyn AuthBackend>,
        credentials: Arc<dyn CredentialAttachment>,
    ) -> Self {
        Self {
            store,
            backend,
            credentials,
            fsm: Mutex::new(SessionMachine::new()),
            current_user: RwLock::new(None),
            op_lock: tokio::sync::Mutex::new(()),
            state_callback: Mutex::new(None),
        }
    }

    /// Build a session and restore it from storage. Never fails.
    pub async fn bootstrap(
        store: CredentialStore,
        backend: Arc<dyn AuthBackend>,
        credentials: Arc<dyn CredentialAttachment>,
    ) -> Self {
        let session = Self::new(store, backend, credentials);
        session.restore().await;
        session
    }

    /// Bootstrap against the shared API client, which serves as both the
    /// auth backend and the credential holder.
    pub async fn bootstrap_with_client(storage: Arc<dyn KeyValueStorage>, api: &ApiClient) -> Self {
        Self::bootstrap(
            CredentialStore::new(storage),
            Arc::new(api.clone()),
            Arc::new(api.clone()),
        )
        .await
    }

    /// Set a callback to be notified of state changes.
    ///
    /// The callback may replace itself; it is invoked without the slot locked.
    pub fn set_state_callback(&self, callback: SessionStateCallback) {
        *self.state_callback.lock() = Some(Arc::from(callback));
    }

    pub fn state(&self) -> SessionState {
        SessionState::from(self.fsm.lock().state())
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_user.read().clone()
    }

    /// True during restore and while signing out.
    pub fn is_restoring(&self) -> bool {
        self.state().is_restoring()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated() && self.current_user.read().is_some()
    }

    /// The signed-in user, or `NotSignedIn`.
    pub fn require_user(&self) -> AuthResult<User> {
        if !self.state().is_authenticated() {
            return Err(AuthError::NotSignedIn);
        }
        self.current_user().ok_or(AuthError::NotSignedIn)
    }

    /// Transition the FSM and notify the callback if the state changed.
    fn transition(&self, input: &SessionMachineInput) -> AuthResult<SessionState> {
        let mut fsm = self.fsm.lock();
        let old_state = SessionState::from(fsm.state());

        fsm.consume(input).map_err(|_| {
            AuthError::InvalidStateTransition(format!(
                "Cannot apply {:?} in state {:?}",
                input,
                fsm.state()
            ))
        })?;

        let new_state = SessionState::from(fsm.state());
        drop(fsm);

        if old_state != new_state {
            debug!(
                old_state = %old_state,
                new_state = %new_state,
                "Session state transition"
            );
            self.notify_state_change(new_state);
        }

        Ok(new_state)
    }

    /// Apply an input the FSM is expected to accept; log if it does not.
    fn settle(&self, input: &SessionMachineInput) {
        if let Err(e) = self.transition(input) {
            warn!(error = %e, "Unexpected session state");
        }
    }

    fn notify_state_change(&self, state: SessionState) {
        let callback = self.state_callback.lock().clone();
        if let Some(callback) = callback {
            let (user_id, name) = self
                .current_user
                .read()
                .as_ref()
                .map(|user| (Some(user.id.clone()), Some(user.name.clone())))
                .unwrap_or((None, None));

            callback(SessionStateChangedPayload {
                state,
                user_id,
                name,
            });
        }
    }

    /// Sign in with email and password.
    ///
    /// On success both records are persisted, the token is attached, and the
    /// session is `Authenticated`. On failure the state is unchanged and the
    /// error is returned as the backend produced it.
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<User> {
        let _op = self.op_lock.lock().await;
        self.authenticate(&SIGN_IN, self.backend.sign_in(email, password))
            .await
    }

    /// Create an account and sign in to it. Same contract as [`sign_in`](Self::sign_in).
    pub async fn sign_up(&self, email: &str, password: &str, name: &str) -> AuthResult<User> {
        let _op = self.op_lock.lock().await;
        self.authenticate(&SIGN_UP, self.backend.sign_up(email, password, name))
            .await
    }

    async fn authenticate<F>(&self, inputs: &AuthInputs, request: F) -> AuthResult<User>
    where
        F: Future<Output = ApiResult<AuthSession>>,
    {
        self.transition(&inputs.attempt)?;

        let AuthSession { user, access_token } = match request.await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, status = ?e.status(), "Authentication request failed");
                self.settle(&inputs.failed);
                return Err(e.into());
            }
        };

        if let Err(e) = self.persist(&user, &access_token) {
            warn!(user_id = %user.id, error = %e, "Failed to persist session");
            self.discard_persisted();
            self.settle(&inputs.failed);
            return Err(e.into());
        }

        self.credentials.attach_token(&access_token);
        *self.current_user.write() = Some(user.clone());
        self.transition(&inputs.success)?;

        info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    fn persist(&self, user: &User, access_token: &str) -> StorageResult<()> {
        self.store.save_user(user)?;
        self.store.save_credential(access_token)
    }

    /// Best-effort removal of both records.
    fn discard_persisted(&self) {
        if let Err(e) = self.store.remove_user() {
            warn!(error = %e, "Failed to remove stored user");
        }
        if let Err(e) = self.store.remove_credential() {
            warn!(error = %e, "Failed to remove stored credential");
        }
    }

    /// Sign out: clear the user, detach the token, remove both records.
    ///
    /// The in-memory session is always cleared. A failure removing either
    /// record is returned after that, the first one winning.
    pub async fn sign_out(&self) -> AuthResult<()> {
        let _op = self.op_lock.lock().await;
        self.transition(&SessionMachineInput::SignOutRequested)?;

        let user_id = self.current_user.write().take().map(|user| user.id);
        self.credentials.detach_token();

        let user_removed = self.store.remove_user();
        let credential_removed = self.store.remove_credential();

        self.settle(&SessionMachineInput::SignOutComplete);

        user_removed.and(credential_removed).map_err(|e| {
            warn!(error = %e, "Failed to remove persisted session");
            AuthError::from(e)
        })?;

        info!(user_id = user_id.as_deref().unwrap_or("-"), "Signed out");
        Ok(())
    }

    /// Rebuild the session from storage without any network call.
    ///
    /// Returns whether a user was restored. Storage errors are logged and
    /// treated as "no session". A half-present pair is cleared.
    pub async fn restore(&self) -> bool {
        let _op = self.op_lock.lock().await;
        if let Err(e) = self.transition(&SessionMachineInput::RestoreRequested) {
            warn!(error = %e, "Restore skipped");
            return self.is_authenticated();
        }

        let mut read_failed = false;
        let user = self.store.get_user().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read stored user");
            read_failed = true;
            None
        });
        let access_token = self.store.get_credential().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read stored credential");
            read_failed = true;
            None
        });

        let user = user.filter(User::is_valid);
        let access_token = access_token.filter(|token| !token.is_empty());

        if let (Some(user), Some(access_token)) = (user.as_ref(), access_token.as_ref()) {
            self.credentials.attach_token(access_token);
            *self.current_user.write() = Some(user.clone());
            self.settle(&SessionMachineInput::RestoredSession);
            info!(user_id = %user.id, "Session restored");
            return true;
        }

        if user.is_some() || access_token.is_some() {
            warn!(
                has_user = user.is_some(),
                has_credential = access_token.is_some(),
                "Discarding incomplete stored session"
            );
        }
        if !read_failed {
            self.discard_persisted();
        }

        *self.current_user.write() = None;
        self.credentials.detach_token();
        self.settle(&SessionMachineInput::NoSession);
        debug!("No stored session");
        false
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state())
            .field("user_id", &self.current_user.read().as_ref().map(|u| u.id.clone()))
            .finish_non_exhaustive()
    }
}
