/**
 * Authentication Module
 *
 * Admin login, logout and session expiry, modelled as one explicit
 * context object that screens observe instead of reading storage ad hoc.
 *
 *   LoggedOut --login--> Authenticating --ok--> LoggedIn
 *                              |
 *                              +--failure--> LoggedOut
 *   any --logout / expiry--> LoggedOut
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::egui_app::api_client::{ApiClient, ApiError, SentToken};
use crate::egui_app::credential_store::{CredentialError, ADMIN_TOKEN_KEY};
use crate::egui_app::navigation::{Navigator, Screen};
use crate::egui_app::types::{LoginRequest, LoginResponse};
use crate::shared::config::ApiRoutes;
use crate::shared::error::{require_trimmed, ValidationError};

/// Where the admin session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    LoggedOut,
    Authenticating,
    LoggedIn,
}

/// Inputs to the auth state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    LoginStarted,
    LoginSucceeded,
    LoginFailed,
    /// A token was already stored at start-up
    Restored,
    LoggedOut,
    SessionExpired,
}

impl AuthPhase {
    /// Transition function. A login that completes after a logout still
    /// wins, since its token write is the last one.
    pub fn next(self, event: AuthEvent) -> AuthPhase {
        match (self, event) {
            (_, AuthEvent::LoginStarted) => AuthPhase::Authenticating,
            (_, AuthEvent::LoginSucceeded) => AuthPhase::LoggedIn,
            (AuthPhase::Authenticating, AuthEvent::LoginFailed) => AuthPhase::LoggedOut,
            (AuthPhase::LoggedOut, AuthEvent::Restored) => AuthPhase::LoggedIn,
            (_, AuthEvent::LoggedOut) | (_, AuthEvent::SessionExpired) => AuthPhase::LoggedOut,
            (phase, _) => phase,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Missing token, wrong role, or rejected credentials
    #[error("invalid credentials or unauthorized role")]
    InvalidCredentials,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("could not store credentials: {0}")]
    Storage(#[from] CredentialError),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Validation(e) => e.message.clone(),
            AuthError::InvalidCredentials => "Invalid credentials or unauthorized role.".to_string(),
            AuthError::Api(_) => {
                "Could not connect to server. Please check your credentials and try again."
                    .to_string()
            }
            AuthError::Storage(_) => "Could not save your session. Please try again.".to_string(),
        }
    }
}

/// Login form state
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub error: Option<String>,
    pub loading: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }
}

/// Single owner of the admin session
pub struct AuthContext {
    api: ApiClient,
    login_route: String,
    navigator: Arc<dyn Navigator>,
    phase: watch::Sender<AuthPhase>,
    // Set while a forced redirect to login is outstanding
    redirect_pending: AtomicBool,
    // Serializes writes to the stored token
    session: Mutex<()>,
}

impl AuthContext {
    pub fn new(api: ApiClient, routes: &ApiRoutes, navigator: Arc<dyn Navigator>) -> Self {
        let (phase, _) = watch::channel(AuthPhase::LoggedOut);
        Self {
            api,
            login_route: routes.login.clone(),
            navigator,
            phase,
            redirect_pending: AtomicBool::new(false),
            session: Mutex::new(()),
        }
    }

    /// The client every screen issues requests through
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn phase(&self) -> AuthPhase {
        *self.phase.borrow()
    }

    /// Observe phase changes
    pub fn subscribe(&self) -> watch::Receiver<AuthPhase> {
        self.phase.subscribe()
    }

    pub fn redirect_pending(&self) -> bool {
        self.redirect_pending.load(Ordering::SeqCst)
    }

    /// Called once the login screen is showing after a forced redirect
    pub fn acknowledge_redirect(&self) {
        self.redirect_pending.store(false, Ordering::SeqCst);
    }

    fn apply(&self, event: AuthEvent) -> AuthPhase {
        let mut from = AuthPhase::LoggedOut;
        let mut to = AuthPhase::LoggedOut;
        self.phase.send_modify(|phase| {
            from = *phase;
            *phase = phase.next(event);
            to = *phase;
        });
        debug!(?from, ?event, ?to, "auth transition");
        to
    }

    async fn stored_token(&self) -> Option<String> {
        match self.api.credentials().get_item(ADMIN_TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "could not read stored token");
                None
            }
        }
    }

    /// Whether a token is currently stored
    pub async fn has_token(&self) -> bool {
        self.stored_token().await.is_some()
    }

    /// Pick up a session left over from a previous run
    pub async fn restore(&self) -> AuthPhase {
        if self.has_token().await {
            info!("restored stored admin session");
            return self.apply(AuthEvent::Restored);
        }
        self.phase()
    }

    /// Authenticate an admin and open the dashboard.
    ///
    /// Succeeds only when the backend returns a token together with the
    /// `admin` role.
    pub async fn login(&self, employee_id: &str, password: &str) -> Result<(), AuthError> {
        let employee_id = require_trimmed(employee_id, "employee_id", "Employee ID")?;
        if password.is_empty() {
            return Err(ValidationError::required("password", "Password").into());
        }

        self.acknowledge_redirect();
        self.apply(AuthEvent::LoginStarted);

        let request = LoginRequest {
            employee_id: employee_id.to_string(),
            password: password.to_string(),
        };

        let response = match self
            .api
            .post_json::<_, LoginResponse>(&self.login_route, &request)
            .await
        {
            Ok(response) => response,
            Err(ApiError::Decode(e)) => {
                warn!(employee_id, error = %e, "unreadable login response");
                self.apply(AuthEvent::LoginFailed);
                return Err(AuthError::InvalidCredentials);
            }
            Err(ApiError::SessionExpired(_)) | Err(ApiError::Api { status: 401 | 403, .. }) => {
                info!(employee_id, "login rejected by server");
                self.apply(AuthEvent::LoginFailed);
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                error!(employee_id, error = %e, "login request failed");
                self.apply(AuthEvent::LoginFailed);
                return Err(e.into());
            }
        };

        let Some(token) = response.admin_token() else {
            info!(employee_id, role = ?response.role, "login response lacks admin grant");
            self.apply(AuthEvent::LoginFailed);
            return Err(AuthError::InvalidCredentials);
        };

        let _session = self.session.lock().await;
        if let Err(e) = self.api.credentials().set_item(ADMIN_TOKEN_KEY, token).await {
            error!(error = %e, "could not persist admin token");
            self.apply(AuthEvent::LoginFailed);
            return Err(e.into());
        }

        self.apply(AuthEvent::LoginSucceeded);
        info!(employee_id, "admin logged in");
        self.navigator.replace(Screen::AdminDashboard);
        Ok(())
    }

    /// Clear the session and return to the login screen.
    ///
    /// The transition and navigation happen even when the token cannot be
    /// removed; the storage failure is still returned to the caller.
    pub async fn logout(&self) -> Result<(), CredentialError> {
        let _session = self.session.lock().await;
        let removed = self.api.credentials().remove_item(ADMIN_TOKEN_KEY).await;
        if let Err(e) = &removed {
            warn!(error = %e, "token removal failed during logout");
        }

        self.apply(AuthEvent::LoggedOut);
        self.navigator.reset_to(Screen::AdminLogin);
        info!("admin logged out");
        removed
    }

    /// Force a re-login after the server rejected the stored token.
    ///
    /// Returns `false` when a redirect is already outstanding, so repeated
    /// 401s navigate only once.
    pub async fn expire_session(&self) -> bool {
        let _session = self.session.lock().await;
        self.expire_locked().await
    }

    async fn expire_locked(&self) -> bool {
        if self.redirect_pending.swap(true, Ordering::SeqCst) {
            debug!("session expiry already being handled");
            return false;
        }

        warn!("session expired, forcing re-login");
        if let Err(e) = self.api.credentials().remove_item(ADMIN_TOKEN_KEY).await {
            warn!(error = %e, "token removal failed during session expiry");
        }
        self.apply(AuthEvent::SessionExpired);
        self.navigator.reset_to(Screen::AdminLogin);
        true
    }

    /// Expire the session only if `sent` is still the stored token. A 401
    /// for a token that was already replaced or removed changes nothing.
    pub async fn expire_rejected(&self, sent: &SentToken) -> bool {
        let _session = self.session.lock().await;
        if self.stored_token().await.as_deref() != Some(sent.as_str()) {
            debug!("401 for a session that is no longer current");
            return false;
        }
        self.expire_locked().await
    }

    /// Apply the session-expiry policy to a call result and pass it through
    pub async fn intercept<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(ApiError::SessionExpired(sent)) = &result {
            self.expire_rejected(sent).await;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::config::Config;
    use crate::egui_app::credential_store::{CredentialStore, MemoryCredentialStore};
    use crate::egui_app::navigation::NavigationStack;
    use crate::shared::config::AppConfig;

    #[test]
    fn test_transitions() {
        use AuthEvent as E;
        use AuthPhase as P;

        assert_eq!(P::LoggedOut.next(E::LoginStarted), P::Authenticating);
        assert_eq!(P::Authenticating.next(E::LoginSucceeded), P::LoggedIn);
        assert_eq!(P::Authenticating.next(E::LoginFailed), P::LoggedOut);
        assert_eq!(P::LoggedIn.next(E::LoginFailed), P::LoggedIn);
        assert_eq!(P::LoggedIn.next(E::LoggedOut), P::LoggedOut);
        assert_eq!(P::Authenticating.next(E::SessionExpired), P::LoggedOut);
        assert_eq!(P::LoggedOut.next(E::Restored), P::LoggedIn);
        assert_eq!(P::LoggedIn.next(E::Restored), P::LoggedIn);
        // A login finishing after a logout is the last write
        assert_eq!(P::LoggedOut.next(E::LoginSucceeded), P::LoggedIn);
    }

    #[test]
    fn test_auth_state_errors() {
        let mut state = AuthState::new();
        assert!(!state.loading);
        state.set_error("Test error".to_string());
        assert_eq!(state.error, Some("Test error".to_string()));
        state.clear_error();
        assert!(state.error.is_none());
    }

    fn context(store: Arc<MemoryCredentialStore>) -> (AuthContext, NavigationStack) {
        let config =
            Config::with_builder(AppConfig::builder().server_url("http://127.0.0.1:9")).unwrap();
        let api = ApiClient::configure(&config, store).unwrap();
        let nav = NavigationStack::default();
        let auth = AuthContext::new(api, config.routes(), Arc::new(nav.clone()));
        (auth, nav)
    }

    #[tokio::test]
    async fn test_login_validation_skips_network() {
        let (auth, nav) = context(Arc::new(MemoryCredentialStore::new()));

        let err = auth.login("   ", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(ref v) if v.field == "employee_id"));

        let err = auth.login("101", "").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(ref v) if v.field == "password"));

        assert_eq!(auth.phase(), AuthPhase::LoggedOut);
        assert_eq!(nav.current(), Screen::Home);
    }

    #[tokio::test]
    async fn test_restore_with_stored_token() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.set_item(ADMIN_TOKEN_KEY, "abc").await.unwrap();
        let (auth, _nav) = context(store);

        let mut rx = auth.subscribe();
        assert_eq!(auth.restore().await, AuthPhase::LoggedIn);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), AuthPhase::LoggedIn);
    }

    #[tokio::test]
    async fn test_expire_session_is_idempotent_until_acknowledged() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.set_item(ADMIN_TOKEN_KEY, "abc").await.unwrap();
        let (auth, nav) = context(store.clone());
        nav.navigate(Screen::AdminDashboard);

        assert!(auth.expire_session().await);
        assert!(!auth.expire_session().await);
        assert_eq!(nav.history(), vec![Screen::AdminLogin]);
        assert_eq!(store.get_item(ADMIN_TOKEN_KEY).await.unwrap(), None);

        auth.acknowledge_redirect();
        assert!(auth.expire_session().await);
    }

    #[tokio::test]
    async fn test_rejection_of_replaced_token_is_ignored() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.set_item(ADMIN_TOKEN_KEY, "new").await.unwrap();
        let (auth, nav) = context(store.clone());
        auth.restore().await;
        nav.navigate(Screen::AdminDashboard);

        assert!(!auth.expire_rejected(&SentToken::new("old")).await);
        assert_eq!(auth.phase(), AuthPhase::LoggedIn);
        assert_eq!(nav.current(), Screen::AdminDashboard);
        assert_eq!(store.get_item(ADMIN_TOKEN_KEY).await.unwrap().as_deref(), Some("new"));

        assert!(auth.expire_rejected(&SentToken::new("new")).await);
        assert_eq!(auth.phase(), AuthPhase::LoggedOut);
        assert_eq!(nav.history(), vec![Screen::AdminLogin]);
    }
}
