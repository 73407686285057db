/**
 * Wire Types Module
 *
 * Request and response bodies exchanged with the backend that are not
 * shared domain types.
 */

use serde::{Deserialize, Serialize};

/// Role the backend must report for dashboard access
pub const ADMIN_ROLE: &str = "admin";

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub employee_id: String,
    pub password: String,
}

/// Login response. Both fields are optional on the wire; the client
/// decides what a usable response looks like.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl LoginResponse {
    /// The token, if the response grants admin access
    pub fn admin_token(&self) -> Option<&str> {
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        (self.role.as_deref() == Some(ADMIN_ROLE)).then_some(token)
    }
}

/// Employee lookup response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(default)]
    pub name: Option<String>,
}
