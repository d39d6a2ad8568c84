//! Volunteer registration model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Lifecycle state of a volunteer registration.
///
/// A registration is created `Pending` and moves exactly once to `Accepted`
/// or `Rejected`; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Accepted => "accepted",
            RegistrationStatus::Rejected => "rejected",
        }
    }

    /// Terminal states admit no further transition.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RegistrationStatus::Pending)
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub volunteer_id: i64,
    pub contact_info: String,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRegistrationRequest {
    pub event_id: i64,
    pub volunteer_id: i64,
    pub contact_info: String,
}

/// Result of a successful accept, including whether it filled the event's
/// last slot and how many still-pending registrations the capacity
/// auto-close swept to `rejected`.
#[derive(Debug, Clone)]
pub struct AcceptOutcome {
    pub registration: Registration,
    pub auto_rejected: u64,
    pub closed: bool,
}

impl AcceptOutcome {
    /// True when this accept reached the event's capacity, even when no
    /// pending registrations were left to sweep.
    pub fn closed_event(&self) -> bool {
        self.closed
    }
}
