//! Ticket listing for the home and admin dashboard screens.
//!
//! A [`TicketBoard`] owns the load state of one screen's list. Refreshes
//! are tagged with a generation; a result is applied only if it belongs to
//! the newest refresh and the screen is still focused.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::egui_app::api_client::{ApiError, SentToken};
use crate::egui_app::auth::AuthContext;
use crate::egui_app::services::AppServices;
use crate::shared::config::ApiRoutes;
use crate::shared::ticket::Ticket;

const FETCH_FAILED: &str = "Failed to fetch tickets. Please try again.";

/// Which list a board shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketSource {
    /// Employee-facing summary on the home screen
    Home,
    /// Admin dashboard
    Dashboard,
    /// Combined report listing for admins
    AdminReports,
}

impl TicketSource {
    pub fn route(self, routes: &ApiRoutes) -> &str {
        match self {
            TicketSource::Home => &routes.home_tickets,
            TicketSource::Dashboard => &routes.dashboard_tickets,
            TicketSource::AdminReports => &routes.admin_reports,
        }
    }

    /// Admin sources are never requested without a stored token
    pub fn requires_auth(self) -> bool {
        !matches!(self, TicketSource::Home)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready(Vec<Ticket>),
    Empty,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// What happened to a refresh's result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// Superseded by a newer refresh, or the screen lost focus
    Discarded,
    /// Handed to the session-expiry policy
    SessionExpired,
}

pub struct TicketBoard {
    auth: Arc<AuthContext>,
    source: TicketSource,
    route: String,
    state: Mutex<LoadState>,
    generation: AtomicU64,
    active: AtomicBool,
}

impl TicketBoard {
    pub fn new(services: &AppServices, source: TicketSource) -> Self {
        Self {
            auth: services.auth.clone(),
            source,
            route: source.route(services.config.routes()).to_string(),
            state: Mutex::new(LoadState::Idle),
            generation: AtomicU64::new(0),
            active: AtomicBool::new(true),
        }
    }

    pub fn source(&self) -> TicketSource {
        self.source
    }

    pub fn state(&self) -> LoadState {
        self.lock().clone()
    }

    /// Fetch the list once, applying the session policy.
    ///
    /// For admin sources a missing token short-circuits to session expiry
    /// without a request.
    pub async fn fetch_tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        if self.source.requires_auth() && !self.auth.has_token().await {
            debug!(source = ?self.source, "no stored token, skipping ticket request");
            self.auth.expire_session().await;
            return Err(ApiError::SessionExpired(SentToken::default()));
        }

        let body = self.auth.intercept(self.auth.api().get(&self.route).await).await?;
        Ticket::list_from_body(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Reload the list into the board's state
    pub async fn refresh(&self) -> RefreshOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.lock() = LoadState::Loading;

        let result = self.fetch_tickets().await;

        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation || !self.active.load(Ordering::SeqCst) {
            debug!(source = ?self.source, generation, "discarding stale ticket result");
            return RefreshOutcome::Discarded;
        }

        match result {
            Ok(tickets) if tickets.is_empty() => {
                *state = LoadState::Empty;
                RefreshOutcome::Applied
            }
            Ok(tickets) => {
                debug!(source = ?self.source, count = tickets.len(), "tickets loaded");
                *state = LoadState::Ready(tickets);
                RefreshOutcome::Applied
            }
            Err(ApiError::SessionExpired(_)) => {
                *state = LoadState::Idle;
                RefreshOutcome::SessionExpired
            }
            Err(e) => {
                warn!(source = ?self.source, error = %e, "failed to fetch tickets");
                *state = LoadState::Failed(FETCH_FAILED.to_string());
                RefreshOutcome::Applied
            }
        }
    }

    /// Screen regained focus: re-fetch
    pub async fn on_focus(&self) -> RefreshOutcome {
        self.active.store(true, Ordering::SeqCst);
        self.refresh().await
    }

    /// Screen lost focus: results still in flight will be dropped
    pub fn on_blur(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        if state.is_loading() {
            *state = LoadState::Idle;
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoadState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_routes() {
        let routes = ApiRoutes::default();
        assert_eq!(TicketSource::Home.route(&routes), "/api/tickets");
        assert_eq!(TicketSource::Dashboard.route(&routes), "/api/tickets");
        assert_eq!(TicketSource::AdminReports.route(&routes), "/api/admin/reports");
    }

    #[test]
    fn test_only_home_is_anonymous() {
        assert!(!TicketSource::Home.requires_auth());
        assert!(TicketSource::Dashboard.requires_auth());
        assert!(TicketSource::AdminReports.requires_auth());
    }
}
