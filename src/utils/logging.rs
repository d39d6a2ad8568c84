//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the VolunteerHub application.

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
///
/// With a `file_path` configured, log lines also go to a daily-rolling file
/// in that directory. The returned guard flushes the file writer; hold it for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout));

    let guard = match config.file_path {
        Some(ref directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "volunteerhub.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    };

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log event management actions with structured data
pub fn log_event_action(event_id: i64, action: &str, title: &str) {
    info!(
        event_id = event_id,
        action = action,
        title = title,
        "Event action performed"
    );
}

/// Log moderator decisions on registrations
pub fn log_registration_decision(
    registration_id: i64,
    action: &str,
    event_id: i64,
    moderator_id: i64,
    auto_rejected: u64,
) {
    info!(
        registration_id = registration_id,
        action = action,
        event_id = event_id,
        moderator_id = moderator_id,
        auto_rejected = auto_rejected,
        "Registration decision recorded"
    );
}
