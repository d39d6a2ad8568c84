//! Error handling for VolunteerHub
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the VolunteerHub core
#[derive(Error, Debug)]
pub enum VolunteerHubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Registration not found: {registration_id}")]
    RegistrationNotFound { registration_id: i64 },

    #[error("Volunteer {volunteer_id} is already registered for event {event_id}")]
    AlreadyRegistered { event_id: i64, volunteer_id: i64 },

    #[error("Registration is closed for event {event_id}")]
    RegistrationClosed { event_id: i64 },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for VolunteerHub operations
pub type Result<T> = std::result::Result<T, VolunteerHubError>;

impl VolunteerHubError {
    /// Map a storage error raised while inserting the (event, volunteer) pair.
    ///
    /// The `unique_event_volunteer` constraint is the authoritative guard
    /// against duplicate submissions; a unique violation on it means the
    /// volunteer already holds a registration for this event.
    pub fn from_registration_insert(err: sqlx::Error, event_id: i64, volunteer_id: i64) -> Self {
        match &err {
            sqlx::Error::Database(db) => match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    VolunteerHubError::AlreadyRegistered { event_id, volunteer_id }
                }
                _ => Self::from_database(err),
            },
            _ => VolunteerHubError::Database(err),
        }
    }

    /// Map a storage error to `ConstraintViolation` when it stems from a
    /// unique, foreign-key, not-null or check constraint; otherwise keep it
    /// as a plain database error.
    pub fn from_database(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::NotNullViolation
                | sqlx::error::ErrorKind::CheckViolation => {
                    let constraint = db.constraint().unwrap_or("unknown").to_string();
                    VolunteerHubError::ConstraintViolation(constraint)
                }
                _ => VolunteerHubError::Database(err),
            },
            _ => VolunteerHubError::Database(err),
        }
    }

    /// Check if the error is recoverable by retrying the request
    pub fn is_recoverable(&self) -> bool {
        match self {
            VolunteerHubError::Database(_) => false,
            VolunteerHubError::Migration(_) => false,
            VolunteerHubError::Config(_) => false,
            VolunteerHubError::PermissionDenied(_) => false,
            VolunteerHubError::UserNotFound { .. } => false,
            VolunteerHubError::EventNotFound { .. } => false,
            VolunteerHubError::RegistrationNotFound { .. } => false,
            VolunteerHubError::AlreadyRegistered { .. } => false,
            // A closed window does not reopen without an event edit.
            VolunteerHubError::RegistrationClosed { .. } => false,
            VolunteerHubError::ConstraintViolation(_) => false,
            VolunteerHubError::Serialization(_) => false,
            VolunteerHubError::Io(_) => true,
            VolunteerHubError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VolunteerHubError::Database(_) => ErrorSeverity::Critical,
            VolunteerHubError::Migration(_) => ErrorSeverity::Critical,
            VolunteerHubError::Config(_) => ErrorSeverity::Critical,
            VolunteerHubError::PermissionDenied(_) => ErrorSeverity::Warning,
            VolunteerHubError::AlreadyRegistered { .. } => ErrorSeverity::Info,
            VolunteerHubError::RegistrationClosed { .. } => ErrorSeverity::Info,
            VolunteerHubError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
