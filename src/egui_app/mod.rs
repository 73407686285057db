//! egui Native Desktop App Module
//!
//! Employee grievance desk: a public home screen listing tickets, four
//! report forms, and an admin dashboard behind a token login.
//!
//! # Architecture
//!
//! View-models hold all behavior and are driven by the egui views through
//! [`AppState`]. They can also be used headless, which is how the tests
//! exercise them.
//!
//! - **`config`** - Configuration loading (file, environment)
//! - **`credential_store`** - Persistent key/value storage for the admin token
//! - **`api_client`** - HTTP client with bearer auth and error mapping
//! - **`auth`** - Session lifecycle and the 401 interception policy
//! - **`navigation`** - Screens and the navigation stack
//! - **`tickets`** - Ticket boards for the home screen and dashboard
//! - **`lookup`** - Debounced employee name lookup
//! - **`report_form`** - Report submission for all four categories
//! - **`home`** - Landing screen entries
//! - **`state`** / **`views`** / **`theme`** - egui shell
//!
//! # Example
//!
//! ```rust,no_run
//! // Run the egui app:
//! // cargo run --bin egui_app
//! ```

pub mod api_client;
pub mod auth;
pub mod config;
pub mod credential_store;
pub mod home;
pub mod lookup;
pub mod navigation;
pub mod report_form;
pub mod services;
pub mod state;
pub mod theme;
pub mod tickets;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use api_client::{ApiClient, ApiError, SentToken};
pub use auth::{AuthContext, AuthError, AuthPhase, AuthState};
pub use config::Config;
pub use credential_store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use navigation::{EntryId, NavigationStack, Navigator, Screen};
pub use services::AppServices;
pub use state::AppState;
