//! Service bundle handed to every screen's view-model.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::egui_app::api_client::{ApiClient, ApiError};
use crate::egui_app::auth::AuthContext;
use crate::egui_app::config::Config;
use crate::egui_app::credential_store::CredentialStore;
use crate::egui_app::lookup::EmployeeContext;
use crate::egui_app::navigation::Navigator;

#[derive(Clone)]
pub struct AppServices {
    pub config: Config,
    pub auth: Arc<AuthContext>,
    pub navigator: Arc<dyn Navigator>,
    pub employee: EmployeeContext,
    /// Runtime that background work (debounced lookups) is spawned on
    pub runtime: Handle,
}

impl AppServices {
    pub fn new(
        config: Config,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        runtime: Handle,
    ) -> Result<Self, ApiError> {
        let api = ApiClient::configure(&config, credentials)?;
        let auth = Arc::new(AuthContext::new(api, config.routes(), navigator.clone()));
        Ok(Self {
            config,
            auth,
            navigator,
            employee: EmployeeContext::default(),
            runtime,
        })
    }

    pub fn api(&self) -> &ApiClient {
        self.auth.api()
    }
}
