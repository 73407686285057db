//! Employee Name Lookup
//!
//! Report forms show the employee's name as soon as a valid id is typed.
//! Each edit restarts a debounce timer; only the lookup for the final id
//! may update the display.
//!
//! Cancellation is two-layered:
//!
//! - the pending task is aborted on every edit, which drops the timer and
//!   any request already in flight,
//! - a generation counter is checked under the state lock before a result
//!   is applied, so a task that finished just as it was superseded still
//!   cannot overwrite newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::egui_app::api_client::ApiError;
use crate::egui_app::auth::AuthContext;
use crate::egui_app::services::AppServices;
use crate::egui_app::types::EmployeeRecord;
use crate::shared::config::ApiRoutes;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no employee found with id {0}")]
    NotFound(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl LookupError {
    pub fn user_message(&self) -> String {
        match self {
            LookupError::NotFound(_) | LookupError::Api(ApiError::Api { status: 404, .. }) => {
                "Employee not found.".to_string()
            }
            LookupError::Api(_) => "Unable to fetch employee name.".to_string(),
        }
    }
}

/// Resolve one employee id to a name, without debouncing
pub async fn lookup_name(
    auth: &AuthContext,
    routes: &ApiRoutes,
    employee_id: &str,
) -> Result<String, LookupError> {
    let path = routes.employee(employee_id);
    let result = auth.intercept(auth.api().get_json::<EmployeeRecord>(&path).await).await;

    match result {
        Ok(record) => record
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| LookupError::NotFound(employee_id.to_string())),
        Err(ApiError::Api { status: 404, .. }) | Err(ApiError::Decode(_)) => {
            Err(LookupError::NotFound(employee_id.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Employee details resolved most recently, shared between report screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDetails {
    pub employee_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeContext {
    details: Arc<Mutex<Option<EmployeeDetails>>>,
}

impl EmployeeContext {
    pub fn set_employee_details(&self, employee_id: impl Into<String>, name: impl Into<String>) {
        *lock(&self.details) = Some(EmployeeDetails {
            employee_id: employee_id.into(),
            name: name.into(),
        });
    }

    pub fn details(&self) -> Option<EmployeeDetails> {
        lock(&self.details).clone()
    }

    pub fn clear(&self) {
        *lock(&self.details) = None;
    }
}

/// What the form shows next to the id input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupState {
    /// Trimmed id the current name or error belongs to
    pub employee_id: String,
    pub name: Option<String>,
    /// Inline, non-blocking error
    pub error: Option<String>,
    pub loading: bool,
}

/// Debounced, last-writer-wins employee lookup
pub struct EmployeeLookup {
    auth: Arc<AuthContext>,
    routes: ApiRoutes,
    debounce: Duration,
    employee: EmployeeContext,
    runtime: Handle,
    generation: Arc<AtomicU64>,
    state: Arc<Mutex<LookupState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl EmployeeLookup {
    pub fn new(services: &AppServices) -> Self {
        Self {
            auth: services.auth.clone(),
            routes: services.config.routes().clone(),
            debounce: services.config.lookup_debounce(),
            employee: services.employee.clone(),
            runtime: services.runtime.clone(),
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(Mutex::new(LookupState::default())),
            pending: Mutex::new(None),
        }
    }

    pub fn state(&self) -> LookupState {
        lock(&self.state).clone()
    }

    /// Show an already-known name without a request, e.g. when a form opens
    /// pre-filled from the shared employee context.
    pub fn prime(&self, details: &EmployeeDetails) {
        self.cancel();
        *lock(&self.state) = LookupState {
            employee_id: details.employee_id.clone(),
            name: Some(details.name.clone()),
            error: None,
            loading: false,
        };
    }

    /// Restart the debounce for a new id. An empty id clears the display
    /// immediately.
    pub fn schedule(&self, raw_id: &str) {
        let generation = self.supersede();
        let employee_id = raw_id.trim().to_string();

        {
            let mut state = lock(&self.state);
            if employee_id.is_empty() {
                *state = LookupState::default();
                return;
            }
            state.error = None;
            state.loading = false;
        }

        let task = LookupTask {
            auth: self.auth.clone(),
            routes: self.routes.clone(),
            employee: self.employee.clone(),
            generation: self.generation.clone(),
            state: self.state.clone(),
        };
        let debounce = self.debounce;

        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(debounce).await;
            task.run(generation, employee_id).await;
        });
        *lock(&self.pending) = Some(handle);
    }

    /// Drop any pending or in-flight lookup
    pub fn cancel(&self) {
        self.supersede();
        lock(&self.state).loading = false;
    }

    fn supersede(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(handle) = lock(&self.pending).take() {
            handle.abort();
        }
        generation
    }
}

impl Drop for EmployeeLookup {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.pending).take() {
            handle.abort();
        }
    }
}

struct LookupTask {
    auth: Arc<AuthContext>,
    routes: ApiRoutes,
    employee: EmployeeContext,
    generation: Arc<AtomicU64>,
    state: Arc<Mutex<LookupState>>,
}

impl LookupTask {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn run(self, generation: u64, employee_id: String) {
        {
            let mut state = lock(&self.state);
            if !self.is_current(generation) {
                return;
            }
            state.loading = true;
            state.error = None;
        }

        debug!(employee_id = %employee_id, generation, "looking up employee");
        let result = lookup_name(&self.auth, &self.routes, &employee_id).await;

        let mut state = lock(&self.state);
        if !self.is_current(generation) {
            debug!(employee_id = %employee_id, generation, "discarding stale lookup result");
            return;
        }

        state.loading = false;
        state.employee_id = employee_id.clone();
        match result {
            Ok(name) => {
                state.name = Some(name.clone());
                state.error = None;
                self.employee.set_employee_details(employee_id, name);
            }
            Err(LookupError::Api(ApiError::SessionExpired(_))) => {
                state.name = None;
                state.error = None;
            }
            Err(e) => {
                debug!(employee_id = %employee_id, error = %e, "employee lookup failed");
                state.name = None;
                state.error = Some(e.user_message());
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
