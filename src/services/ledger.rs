//! Registration ledger implementation
//!
//! The ledger owns the event/registration relationship: capacity-aware
//! accepts, uniqueness-gated submissions, and the derived read views.
//! Callers are expected to have authorized the acting identity already;
//! the ledger records who acted but enforces no role policy itself.

use tracing::{debug, info};
use crate::database::repositories::RegistrationRepository;
use crate::models::event::{Event, RegistrationWindow};
use crate::models::registration::{AcceptOutcome, Registration, SubmitRegistrationRequest};
use crate::services::auth::Identity;
use crate::utils::errors::{VolunteerHubError, Result};
use crate::utils::helpers::current_date;
use crate::utils::logging::log_registration_decision;

/// Contact info bounds; the upper bound matches the schema column.
const CONTACT_INFO_MIN: usize = 5;
const CONTACT_INFO_MAX: usize = 200;

/// Ledger service for managing registration lifecycle
#[derive(Clone)]
pub struct RegistrationLedger {
    registration_repository: RegistrationRepository,
}

impl RegistrationLedger {
    /// Create a new RegistrationLedger instance
    pub fn new(registration_repository: RegistrationRepository) -> Self {
        Self {
            registration_repository,
        }
    }

    /// Submit the acting volunteer's registration for an event
    ///
    /// A volunteer registers once per event, ever; duplicates are reported as
    /// `AlreadyRegistered` even when the event has since closed or the new
    /// contact info is invalid. Submissions against a closed window return
    /// `RegistrationClosed` and write nothing.
    pub async fn submit_registration(
        &self,
        actor: &Identity,
        event_id: i64,
        contact_info: String,
    ) -> Result<Registration> {
        debug!(user_id = actor.user_id, event_id = event_id, "Submitting registration");

        // Checked before contact validation so a duplicate always reports as
        // AlreadyRegistered; the repository re-checks the pair under the
        // event lock.
        if self
            .registration_repository
            .find_by_event_and_volunteer(event_id, actor.user_id)
            .await?
            .is_some()
        {
            return Err(VolunteerHubError::AlreadyRegistered {
                event_id,
                volunteer_id: actor.user_id,
            });
        }

        validate_contact_info(&contact_info)?;

        let request = SubmitRegistrationRequest {
            event_id,
            volunteer_id: actor.user_id,
            contact_info,
        };
        let registration = self
            .registration_repository
            .submit(request, current_date())
            .await?;

        info!(
            registration_id = registration.id,
            event_id = event_id,
            volunteer_id = actor.user_id,
            "Registration submitted"
        );
        Ok(registration)
    }

    /// Accept a pending registration on behalf of the acting moderator
    ///
    /// Filling the last open slot sweeps every remaining pending registration
    /// of the event to rejected within the same transaction.
    pub async fn accept_registration(
        &self,
        actor: &Identity,
        event_id: i64,
        registration_id: i64,
    ) -> Result<AcceptOutcome> {
        debug!(
            moderator_id = actor.user_id,
            event_id = event_id,
            registration_id = registration_id,
            "Accepting registration"
        );

        let outcome = self.registration_repository.accept(event_id, registration_id).await?;

        log_registration_decision(
            registration_id,
            "accept",
            event_id,
            actor.user_id,
            outcome.auto_rejected,
        );
        if outcome.closed_event() {
            info!(
                event_id = event_id,
                auto_rejected = outcome.auto_rejected,
                "Event reached capacity"
            );
        }
        Ok(outcome)
    }

    /// Reject a pending registration on behalf of the acting moderator
    pub async fn reject_registration(
        &self,
        actor: &Identity,
        event_id: i64,
        registration_id: i64,
    ) -> Result<Registration> {
        debug!(
            moderator_id = actor.user_id,
            event_id = event_id,
            registration_id = registration_id,
            "Rejecting registration"
        );

        let registration = self.registration_repository.reject(event_id, registration_id).await?;

        log_registration_decision(registration_id, "reject", event_id, actor.user_id, 0);
        Ok(registration)
    }

    /// Get registration by ID
    pub async fn get_registration(&self, registration_id: i64) -> Result<Option<Registration>> {
        self.registration_repository.find_by_id(registration_id).await
    }

    /// A volunteer's registration for an event, in any state
    ///
    /// Callers use this to decide whether to offer the registration form.
    pub async fn registration_for(
        &self,
        event_id: i64,
        volunteer_id: i64,
    ) -> Result<Option<Registration>> {
        self.registration_repository
            .find_by_event_and_volunteer(event_id, volunteer_id)
            .await
    }

    /// Accepted registrations for an event, recomputed from rows
    pub async fn accepted_count(&self, event_id: i64) -> Result<i64> {
        self.registration_repository.count_accepted(event_id).await
    }

    /// Pending registrations awaiting a decision
    pub async fn pending_count(&self, event_id: i64) -> Result<i64> {
        self.registration_repository.count_pending(event_id).await
    }

    /// Current registration window of an event
    pub async fn registration_window(&self, event: &Event) -> Result<RegistrationWindow> {
        let accepted = self.registration_repository.count_accepted(event.id).await?;
        Ok(event.registration_window(current_date(), accepted))
    }

    /// Whether the event still takes submissions today
    pub async fn is_registration_open(&self, event: &Event) -> Result<bool> {
        Ok(self.registration_window(event).await?.is_open())
    }

    /// Pending registrations, oldest submission first
    pub async fn pending_list(&self, event_id: i64) -> Result<Vec<Registration>> {
        self.registration_repository.list_pending(event_id).await
    }

    /// Accepted registrations, newest first
    pub async fn accepted_list(&self, event_id: i64) -> Result<Vec<Registration>> {
        self.registration_repository.list_accepted(event_id).await
    }
}

/// Validate contact details a volunteer hands to moderators
fn validate_contact_info(contact_info: &str) -> Result<()> {
    if contact_info.trim().is_empty() {
        return Err(VolunteerHubError::InvalidInput(
            "Contact information is required".to_string(),
        ));
    }

    let length = contact_info.chars().count();
    if !(CONTACT_INFO_MIN..=CONTACT_INFO_MAX).contains(&length) {
        return Err(VolunteerHubError::InvalidInput(format!(
            "Contact information must be between {} and {} characters",
            CONTACT_INFO_MIN, CONTACT_INFO_MAX
        )));
    }

    Ok(())
}
