//! Grievance Desk - Main Library
//!
//! Desktop client for an employee grievance service. Employees file
//! hostel, transport, company and harassment reports; administrators log
//! in to review the ticket list.
//!
//! # Module Structure
//!
//! - **`shared`** - Platform-agnostic domain types
//!   - Report categories and payload validation
//!   - Ticket records as returned by the backend
//!   - Configuration and validation errors
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - HTTP client, session handling and navigation
//!   - Screen view-models and egui views
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use grievance_desk::egui_app::{AppServices, Config, MemoryCredentialStore, NavigationStack, Screen};
//!
//! # fn example(runtime: tokio::runtime::Handle) -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let services = AppServices::new(
//!     config,
//!     Arc::new(MemoryCredentialStore::new()),
//!     Arc::new(NavigationStack::new(Screen::Home)),
//!     runtime,
//! )?;
//! # let _ = services;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
