//! Ticket Types
//!
//! Read-only projection of a submitted report as the backend tracks it.
//! The backend is not consistent about field names or id types, so every
//! field is optional and ids accept either numbers or strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier that may be sent as a JSON number or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexibleId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for FlexibleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlexibleId::Number(n) => write!(f, "{}", n),
            FlexibleId::Text(s) => f.write_str(s),
        }
    }
}

/// A backend-tracked report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(default)]
    pub id: Option<FlexibleId>,
    #[serde(default)]
    pub ticket_id: Option<FlexibleId>,
    #[serde(default)]
    pub employee_id: Option<FlexibleId>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Ticket {
    /// Decode a list response. A `null` body is an empty list.
    pub fn list_from_body(body: Value) -> Result<Vec<Ticket>, serde_json::Error> {
        if body.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(body)
    }

    /// Stable key for list rendering: `id`, then `ticket_id`, then position.
    pub fn key(&self, position: usize) -> String {
        self.id
            .as_ref()
            .or(self.ticket_id.as_ref())
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("#{}", position))
    }

    /// Who filed the ticket: the employee's name when known, else their id.
    pub fn display_name(&self) -> String {
        match self.employee_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .employee_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "Unknown employee".to_string()),
        }
    }

    pub fn sub_category_label(&self) -> &str {
        self.sub_category.as_deref().unwrap_or("Unspecified")
    }

    pub fn display_status(&self) -> TicketStatus {
        TicketStatus::from_label(self.status.as_deref())
    }
}

/// Display category derived from a ticket's free-form status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Unknown,
}

impl TicketStatus {
    /// Map a status string case-insensitively. Unrecognised or missing
    /// values fall back to [`TicketStatus::Unknown`].
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_lowercase()).as_deref() {
            Some("open") => TicketStatus::Open,
            Some("in progress") => TicketStatus::InProgress,
            Some("resolved") => TicketStatus::Resolved,
            _ => TicketStatus::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Unknown => "Unknown",
        }
    }
}
