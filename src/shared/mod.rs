//! Shared Module
//!
//! Platform-agnostic types: the report categories and their closed
//! subcategory sets, the ticket projection returned by the backend,
//! configuration, and local validation errors. Nothing here performs I/O.

/// Report categories and submission payloads
pub mod report;

/// Ticket projection and status mapping
pub mod ticket;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{ApiRoutes, AppConfig, AppConfigBuilder, ConfigError};
pub use error::ValidationError;
pub use report::{ReportKind, ReportPayload, SubmitResponse};
pub use ticket::{FlexibleId, Ticket, TicketStatus};
