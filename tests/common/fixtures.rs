//! Service fixtures for integration tests
//!
//! Every fixture wires the real client stack against a fresh wiremock
//! server, so tests only differ in the mocks they mount.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use grievance_desk::egui_app::credential_store::{
    CredentialError, CredentialStore, MemoryCredentialStore, ADMIN_TOKEN_KEY,
};
use grievance_desk::egui_app::{AppServices, Config, NavigationStack, Navigator, Screen};
use grievance_desk::shared::config::AppConfig;
use tokio::runtime::Handle;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-admin-token";

/// Short debounce so lookup tests stay fast
pub const TEST_DEBOUNCE: Duration = Duration::from_millis(50);

pub fn test_config(server_url: &str) -> Config {
    let builder = AppConfig::builder()
        .server_url(server_url)
        .request_timeout(Duration::from_secs(5))
        .lookup_debounce(TEST_DEBOUNCE);
    Config::with_builder(builder).expect("test config should be valid")
}

pub struct TestApp {
    pub server: MockServer,
    pub services: AppServices,
    pub navigation: NavigationStack,
    pub store: Arc<dyn CredentialStore>,
}

impl TestApp {
    /// Anonymous session, starting on the home screen
    pub async fn start() -> Self {
        Self::with_store(Arc::new(MemoryCredentialStore::new())).await
    }

    /// A stored admin token, restored the way start-up does it
    pub async fn logged_in() -> Self {
        let app = Self::start().await;
        app.store
            .set_item(ADMIN_TOKEN_KEY, TEST_TOKEN)
            .await
            .expect("memory store should accept writes");
        app.services.auth.restore().await;
        app
    }

    pub async fn with_store(store: Arc<dyn CredentialStore>) -> Self {
        let server = MockServer::start().await;
        let navigation = NavigationStack::new(Screen::Home);
        let services = AppServices::new(
            test_config(&server.uri()),
            store.clone(),
            Arc::new(navigation.clone()),
            Handle::current(),
        )
        .expect("client should build");

        Self {
            server,
            services,
            navigation,
            store,
        }
    }

    pub fn current(&self) -> Screen {
        self.navigation.current()
    }

    pub async fn stored_token(&self) -> Option<String> {
        self.store
            .get_item(ADMIN_TOKEN_KEY)
            .await
            .expect("store should be readable")
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

/// Store whose removals always fail; reads and writes work
#[derive(Debug, Default)]
pub struct FailingRemoveStore {
    inner: MemoryCredentialStore,
}

#[async_trait]
impl CredentialStore for FailingRemoveStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, CredentialError> {
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, _key: &str) -> Result<(), CredentialError> {
        Err(CredentialError::Unavailable("keychain locked".to_string()))
    }
}

/// Poll `condition` until it holds, panicking after two seconds
pub async fn wait_for<F>(mut condition: F)
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        if tokio::time::Instant::now() >= deadline {
            panic!("condition not met within 2s");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
