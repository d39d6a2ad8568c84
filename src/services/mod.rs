//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod event;
pub mod ledger;

// Re-export commonly used services
pub use auth::{Action, Identity, is_allowed, require};
pub use event::EventService;
pub use ledger::RegistrationLedger;

use crate::database::repositories::{EventRepository, RegistrationRepository, UserRepository};
use crate::models::registration::RegistrationStatus;
use crate::models::user::Role;
use crate::utils::errors::Result;
use crate::utils::helpers::current_date;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub ledger: RegistrationLedger,
    user_repository: UserRepository,
    event_repository: EventRepository,
    registration_repository: RegistrationRepository,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        user_repository: UserRepository,
        event_repository: EventRepository,
        registration_repository: RegistrationRepository,
    ) -> Self {
        let event_service = EventService::new(event_repository.clone());
        let ledger = RegistrationLedger::new(registration_repository.clone());

        Self {
            event_service,
            ledger,
            user_repository,
            event_repository,
            registration_repository,
        }
    }

    /// Aggregate counts across users, events, and registrations
    pub async fn overview(&self) -> Result<serde_json::Value> {
        let total_users = self.user_repository.count().await?;
        let administrators = self.user_repository.count_by_role(Role::Administrator).await?;
        let moderators = self.user_repository.count_by_role(Role::Moderator).await?;
        let volunteers = self.user_repository.count_by_role(Role::Volunteer).await?;

        let total_events = self.event_repository.count().await?;
        let upcoming_events = self.event_repository.count_upcoming(current_date()).await?;

        let pending = self
            .registration_repository
            .count_total_by_status(RegistrationStatus::Pending)
            .await?;
        let accepted = self
            .registration_repository
            .count_total_by_status(RegistrationStatus::Accepted)
            .await?;
        let rejected = self
            .registration_repository
            .count_total_by_status(RegistrationStatus::Rejected)
            .await?;

        Ok(serde_json::json!({
            "users": {
                "total": total_users,
                "administrators": administrators,
                "moderators": moderators,
                "volunteers": volunteers,
            },
            "events": {
                "total": total_events,
                "upcoming": upcoming_events,
            },
            "registrations": {
                "pending": pending,
                "accepted": accepted,
                "rejected": rejected,
            },
        }))
    }
}
