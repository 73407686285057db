//! Report Submission Form
//!
//! One form drives all four report screens. The [`ReportKind`] supplies
//! the title, the closed subcategory list and the route; everything else
//! (employee lookup, validation, submission, error surfacing) is shared.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::egui_app::api_client::ApiError;
use crate::egui_app::auth::AuthContext;
use crate::egui_app::lookup::{EmployeeLookup, LookupState};
use crate::egui_app::navigation::{EntryId, Navigator};
use crate::egui_app::services::AppServices;
use crate::shared::config::ApiRoutes;
use crate::shared::error::ValidationError;
use crate::shared::report::{ReportKind, ReportPayload, SubmitResponse};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend answered without confirming success
    #[error("submission failed: {}", .message.as_deref().unwrap_or("no reason given"))]
    SubmissionFailed { message: Option<String> },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("a submission is already in progress")]
    InProgress,
}

impl SubmissionError {
    /// Server-provided messages are shown verbatim
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Validation(e) => e.message.clone(),
            SubmissionError::SubmissionFailed { message: Some(message) } => message.clone(),
            SubmissionError::SubmissionFailed { message: None } => {
                "Submission failed. Unknown error occurred.".to_string()
            }
            SubmissionError::Api(e @ ApiError::SessionExpired(_)) => e.user_message(),
            SubmissionError::Api(_) => {
                "Network or server error occurred. Please try again.".to_string()
            }
            SubmissionError::InProgress => "Your report is still being submitted.".to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct FormInputs {
    employee_id: String,
    sub_category: Option<&'static str>,
    submitting: bool,
    error: Option<String>,
}

/// Everything a screen needs to render the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub employee_id: String,
    pub sub_category: Option<&'static str>,
    pub submitting: bool,
    /// Dismissable notification from the last submit
    pub error: Option<String>,
    pub lookup: LookupState,
}

pub struct ReportForm {
    kind: ReportKind,
    route: String,
    auth: Arc<AuthContext>,
    navigator: Arc<dyn Navigator>,
    // The navigation entry this form was opened on
    entry: EntryId,
    lookup: EmployeeLookup,
    inputs: Mutex<FormInputs>,
}

impl ReportForm {
    /// Open a form on the current navigation entry. If an employee was
    /// resolved on another screen, the id and name carry over.
    pub fn new(services: &AppServices, kind: ReportKind) -> Self {
        let lookup = EmployeeLookup::new(services);
        let mut inputs = FormInputs::default();
        if let Some(details) = services.employee.details() {
            inputs.employee_id = details.employee_id.clone();
            lookup.prime(&details);
        }

        Self {
            kind,
            route: services.config.routes().report(kind).to_string(),
            auth: services.auth.clone(),
            navigator: services.navigator.clone(),
            entry: services.navigator.current_entry(),
            lookup,
            inputs: Mutex::new(inputs),
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn sub_categories(&self) -> &'static [&'static str] {
        self.kind.sub_categories()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let inputs = self.lock();
        FormSnapshot {
            employee_id: inputs.employee_id.clone(),
            sub_category: inputs.sub_category,
            submitting: inputs.submitting,
            error: inputs.error.clone(),
            lookup: self.lookup.state(),
        }
    }

    /// Record the id input and restart the debounced name lookup
    pub fn set_employee_id(&self, raw: &str) {
        {
            let mut inputs = self.lock();
            if inputs.employee_id == raw {
                return;
            }
            inputs.employee_id = raw.to_string();
        }
        self.lookup.schedule(raw);
    }

    /// Select by label; labels outside this form's set are refused
    pub fn select_sub_category(&self, label: &str) -> Result<(), ValidationError> {
        let selected = self.kind.sub_category(label).ok_or_else(|| {
            ValidationError::new(
                "sub_category",
                format!("'{}' is not a {} subcategory.", label, self.kind.title()),
            )
        })?;
        self.lock().sub_category = Some(selected);
        Ok(())
    }

    pub fn select_index(&self, index: usize) -> Result<(), ValidationError> {
        let selected = self.kind.sub_categories().get(index).copied().ok_or_else(|| {
            ValidationError::new("sub_category", format!("No subcategory at position {}.", index))
        })?;
        self.lock().sub_category = Some(selected);
        Ok(())
    }

    pub fn clear_selection(&self) {
        self.lock().sub_category = None;
    }

    pub fn dismiss_error(&self) {
        self.lock().error = None;
    }

    /// Validate locally, post the report, and go back on success.
    ///
    /// Validation failures never reach the network. A response that does
    /// not carry `success: true` is a failure even with HTTP 200.
    pub async fn submit(&self) -> Result<(), SubmissionError> {
        let payload = {
            let mut inputs = self.lock();
            if inputs.submitting {
                return Err(SubmissionError::InProgress);
            }
            let validated =
                ReportPayload::validated(self.kind, &inputs.employee_id, inputs.sub_category);
            match validated {
                Ok(payload) => {
                    inputs.submitting = true;
                    inputs.error = None;
                    payload
                }
                Err(e) => {
                    inputs.error = Some(e.message.clone());
                    return Err(e.into());
                }
            }
        };

        info!(kind = ?self.kind, sub_category = %payload.sub_category, "submitting report");
        let result = self
            .auth
            .intercept(self.auth.api().post(&self.route, &payload).await)
            .await;

        let outcome = match result {
            Ok(body) => {
                let response = SubmitResponse::from_body(&body);
                if response.success {
                    Ok(())
                } else {
                    Err(SubmissionError::SubmissionFailed {
                        message: response.message,
                    })
                }
            }
            Err(e) => Err(SubmissionError::Api(e)),
        };

        {
            let mut inputs = self.lock();
            inputs.submitting = false;
            inputs.error = match &outcome {
                Ok(()) | Err(SubmissionError::Api(ApiError::SessionExpired(_))) => None,
                Err(e) => Some(e.user_message()),
            };
        }

        match &outcome {
            Ok(()) => {
                info!(kind = ?self.kind, "report submitted");
                // No-op if the user left this form while the request was out
                self.navigator.go_back_from(self.entry);
            }
            Err(e) => warn!(kind = ?self.kind, error = %e, "report submission failed"),
        }
        outcome
    }

    fn lock(&self) -> MutexGuard<'_, FormInputs> {
        self.inputs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// List reports already filed under one category, as raw records
pub async fn list_reports(
    auth: &AuthContext,
    routes: &ApiRoutes,
    kind: ReportKind,
) -> Result<Vec<Value>, ApiError> {
    let body = auth.intercept(auth.api().get(routes.report(kind)).await).await?;
    match body {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items),
        other => Err(ApiError::Decode(format!(
            "expected a list of reports, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
