//! Report Types
//!
//! The four complaint categories an employee can file, each with its own
//! closed list of subcategories, plus the wire shapes used to submit them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::error::{require_trimmed, ValidationError};

const HOSTEL: &[&str] = &[
    "Room Maintenance",
    "Food Quality",
    "Noise Issues",
    "Security",
    "Internet Problems",
    "Electricity Issue",
];

const TRANSPORT: &[&str] = &[
    "Bus Late",
    "Route Issue",
    "Driver Complaint",
    "Overcrowding",
    "Safety Concern",
    "Scheduling Issue",
    "Vehicle Condition",
];

const COMPANY: &[&str] = &[
    "Salary Issue",
    "Restroom Cleanliness",
    "Workplace Harassment",
    "Infrastructure Problem",
    "Office Supplies",
    "Security Concern",
];

const HARASSMENT: &[&str] = &[
    "Verbal Abuse",
    "Discrimination",
    "Bullying",
    "Sexual Harassment",
    "Cyber Harassment",
    "Workplace Intimidation",
    "Gender Bias",
];

/// Report category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Hostel,
    Transport,
    Company,
    Harassment,
}

impl ReportKind {
    /// Every category, in the order the home screen lists them
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Hostel,
        ReportKind::Transport,
        ReportKind::Company,
        ReportKind::Harassment,
    ];

    /// Screen title for the category's form
    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Hostel => "Hostel Report",
            ReportKind::Transport => "Transport Report",
            ReportKind::Company => "Company Report",
            ReportKind::Harassment => "Harassment Report",
        }
    }

    /// The closed set of subcategories accepted for this category
    pub fn sub_categories(self) -> &'static [&'static str] {
        match self {
            ReportKind::Hostel => HOSTEL,
            ReportKind::Transport => TRANSPORT,
            ReportKind::Company => COMPANY,
            ReportKind::Harassment => HARASSMENT,
        }
    }

    /// Resolve a label to its canonical entry in the closed set.
    ///
    /// Matching is exact; the returned `&'static str` is the only form a
    /// selection can take once it leaves this module.
    pub fn sub_category(self, label: &str) -> Option<&'static str> {
        self.sub_categories().iter().copied().find(|c| *c == label)
    }

    pub fn contains(self, label: &str) -> bool {
        self.sub_category(label).is_some()
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Body posted to a report route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub employee_id: String,
    pub sub_category: String,
}

impl ReportPayload {
    /// Build a payload from raw form input.
    ///
    /// The employee id is trimmed and must be non-empty; the subcategory must
    /// be present and belong to `kind`.
    pub fn validated(
        kind: ReportKind,
        employee_id: &str,
        sub_category: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let employee_id = require_trimmed(employee_id, "employee_id", "Employee ID")?;
        let sub_category = sub_category
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ValidationError::new("sub_category", "Please select a subcategory."))?;
        let sub_category = kind.sub_category(sub_category).ok_or_else(|| {
            ValidationError::new(
                "sub_category",
                format!("'{}' is not a {} subcategory.", sub_category, kind.title()),
            )
        })?;

        Ok(Self {
            employee_id: employee_id.to_string(),
            sub_category: sub_category.to_string(),
        })
    }
}

/// Outcome reported by the backend for a submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: Option<String>,
}

impl SubmitResponse {
    /// Read the outcome out of an arbitrary response body.
    ///
    /// Only a literal `"success": true` counts as success. Anything else,
    /// including an empty body, is a failure.
    pub fn from_body(body: &Value) -> Self {
        let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        Self { success, message }
    }
}
