//! VolunteerHub core
//!
//! Coordination core for community volunteer events: administrators publish
//! events with a fixed number of volunteer slots, volunteers submit
//! registrations, and moderators accept or reject them until capacity is
//! reached. This library provides the data model, the registration ledger
//! with its capacity auto-close rule, event management, and the role policy;
//! transport layers (web, bots, CLIs) are expected to sit on top.

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{VolunteerHubError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
