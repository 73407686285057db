//! Application configuration module
//!
//! Backend address, network timings and the REST routes the client calls.
//! Routes are configuration rather than constants because the backend has
//! shipped more than one layout for the same resources.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::report::ReportKind;

/// Placeholder substituted with the employee id in the lookup route
pub const EMPLOYEE_ID_PLACEHOLDER: &str = "{id}";

/// Lookup route used by the hostel, company and harassment screens
pub const USERS_LOOKUP_ROUTE: &str = "/users/{id}";

/// Lookup route used by the transport screen
pub const BY_EMPLOYEE_LOOKUP_ROUTE: &str = "/api/users/by-employee/{id}";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_LOOKUP_DEBOUNCE: Duration = Duration::from_millis(500);

/// REST routes consumed by the client, relative to the server URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiRoutes {
    pub login: String,
    pub home_tickets: String,
    pub dashboard_tickets: String,
    pub admin_reports: String,
    pub employee_lookup: String,
    pub hostel_reports: String,
    pub transport_reports: String,
    pub company_reports: String,
    pub harassment_reports: String,
}

impl Default for ApiRoutes {
    fn default() -> Self {
        Self {
            login: "/api/auth/login".to_string(),
            home_tickets: "/api/tickets".to_string(),
            dashboard_tickets: "/api/tickets".to_string(),
            admin_reports: "/api/admin/reports".to_string(),
            employee_lookup: USERS_LOOKUP_ROUTE.to_string(),
            hostel_reports: "/hostel_reports".to_string(),
            transport_reports: "/api/transportReports".to_string(),
            company_reports: "/company_reports".to_string(),
            harassment_reports: "/harassment_reports".to_string(),
        }
    }
}

impl ApiRoutes {
    /// Route a report of the given kind is posted to (and listed from)
    pub fn report(&self, kind: ReportKind) -> &str {
        match kind {
            ReportKind::Hostel => &self.hostel_reports,
            ReportKind::Transport => &self.transport_reports,
            ReportKind::Company => &self.company_reports,
            ReportKind::Harassment => &self.harassment_reports,
        }
    }

    /// Lookup route for one employee, with the id percent-encoded
    pub fn employee(&self, employee_id: &str) -> String {
        self.employee_lookup
            .replace(EMPLOYEE_ID_PLACEHOLDER, &urlencoding::encode(employee_id))
    }

    fn check(&self) -> Result<(), ConfigError> {
        let all = [
            &self.login,
            &self.home_tickets,
            &self.dashboard_tickets,
            &self.admin_reports,
            &self.employee_lookup,
            &self.hostel_reports,
            &self.transport_reports,
            &self.company_reports,
            &self.harassment_reports,
        ];
        if let Some(bad) = all.iter().find(|r| !r.starts_with('/')) {
            return Err(ConfigError::InvalidRoute((*bad).clone()));
        }
        if !self.employee_lookup.contains(EMPLOYEE_ID_PLACEHOLDER) {
            return Err(ConfigError::InvalidRoute(self.employee_lookup.clone()));
        }
        Ok(())
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Server URL, without a trailing slash
    pub server_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Delay between the last employee-id edit and the lookup request
    pub lookup_debounce: Duration,
    pub routes: ApiRoutes,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// On-disk shape of the optional TOML config file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
    lookup_debounce_ms: Option<u64>,
    routes: Option<ApiRoutes>,
}

/// Builder for AppConfig
#[derive(Debug, Default, Clone)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    request_timeout: Option<Duration>,
    lookup_debounce: Option<Duration>,
    routes: Option<ApiRoutes>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn lookup_debounce(mut self, debounce: Duration) -> Self {
        self.lookup_debounce = Some(debounce);
        self
    }

    pub fn routes(mut self, routes: ApiRoutes) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Overlay values from a TOML document. Keys absent from the document
    /// keep whatever the builder already holds.
    pub fn merge_toml(mut self, text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        if let Some(url) = file.server_url {
            self.server_url = Some(url);
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(ms) = file.lookup_debounce_ms {
            self.lookup_debounce = Some(Duration::from_millis(ms));
        }
        if let Some(routes) = file.routes {
            self.routes = Some(routes);
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let raw = self.server_url.ok_or(ConfigError::MissingValue("server_url"))?;
        let parsed =
            reqwest::Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(raw));
        }

        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        if request_timeout.is_zero() {
            return Err(ConfigError::MissingValue("request_timeout"));
        }

        let routes = self.routes.unwrap_or_default();
        routes.check()?;

        Ok(AppConfig {
            server_url: raw.trim_end_matches('/').to_string(),
            request_timeout,
            lookup_debounce: self.lookup_debounce.unwrap_or(DEFAULT_LOOKUP_DEBOUNCE),
            routes,
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid route: {0}")]
    InvalidRoute(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
}
