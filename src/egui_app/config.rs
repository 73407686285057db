use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::shared::config::{ApiRoutes, AppConfig, AppConfigBuilder, ConfigError};

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Environment variable overriding the backend address
pub const API_URL_ENV: &str = "GRIEVANCE_API_URL";

/// Environment variable pointing at a TOML config file
pub const CONFIG_PATH_ENV: &str = "GRIEVANCE_CONFIG";

/// Application configuration wrapper.
///
/// Layers, lowest precedence first: built-in defaults, the TOML file, then
/// the `GRIEVANCE_API_URL` environment variable.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Resolve configuration from the environment and the config file
    pub fn load() -> Result<Self, ConfigError> {
        let api_url = std::env::var(API_URL_ENV).ok().filter(|v| !v.trim().is_empty());
        let explicit_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::from_sources(api_url, explicit_path)
    }

    /// Resolve configuration from explicit sources.
    ///
    /// An explicit config path must exist; the default path under the
    /// platform config directory is optional.
    pub fn from_sources(
        api_url: Option<String>,
        explicit_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder().server_url(DEFAULT_SERVER_URL);

        match explicit_path {
            Some(path) => builder = merge_file(builder, &path)?,
            None => {
                if let Some(path) = default_config_path().filter(|p| p.exists()) {
                    builder = merge_file(builder, &path)?;
                }
            }
        }

        if let Some(url) = api_url {
            debug!(env = API_URL_ENV, "server URL overridden from environment");
            builder = builder.server_url(url);
        }

        Self::with_builder(builder)
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    pub fn routes(&self) -> &ApiRoutes {
        &self.app.routes
    }

    pub fn request_timeout(&self) -> Duration {
        self.app.request_timeout
    }

    pub fn lookup_debounce(&self) -> Duration {
        self.app.lookup_debounce
    }
}

/// `<config dir>/grievance-desk/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("grievance-desk").join("config.toml"))
}

fn merge_file(builder: AppConfigBuilder, path: &Path) -> Result<AppConfigBuilder, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    info!(path = %path.display(), "loading config file");
    builder.merge_toml(&text)
}
