//! Registration repository implementation
//!
//! All writes that depend on event capacity run inside a transaction that
//! first locks the event row, so per-event capacity decisions are serialized.

use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use sqlx::PgPool;
use chrono::{NaiveDate, Utc};
use crate::models::event::Event;
use crate::models::registration::{AcceptOutcome, Registration, RegistrationStatus, SubmitRegistrationRequest};
use crate::utils::errors::VolunteerHubError;

#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Submit a pending registration for an event
    ///
    /// The event row is locked for the duration of the transaction. A volunteer
    /// with any prior registration for the event is turned away before the
    /// window is inspected, so duplicates report as duplicates even after the
    /// event closes.
    pub async fn submit(
        &self,
        request: SubmitRegistrationRequest,
        today: NaiveDate,
    ) -> Result<Registration, VolunteerHubError> {
        let event_id = request.event_id;
        let volunteer_id = request.volunteer_id;

        let mut tx = self.pool.begin().await?;

        let event = self.lock_event(&mut tx, event_id).await?;

        let existing: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND volunteer_id = $2"
        )
        .bind(event_id)
        .bind(volunteer_id)
        .fetch_one(&mut *tx)
        .await?;

        if existing.0 > 0 {
            return Err(VolunteerHubError::AlreadyRegistered { event_id, volunteer_id });
        }

        let accepted = self.count_accepted_in_tx(&mut tx, event_id).await?;
        if !event.registration_window(today, accepted).is_open() {
            return Err(VolunteerHubError::RegistrationClosed { event_id });
        }

        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (event_id, volunteer_id, contact_info, status, registered_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, volunteer_id, contact_info, status, registered_at
            "#
        )
        .bind(event_id)
        .bind(volunteer_id)
        .bind(request.contact_info)
        .bind(RegistrationStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| VolunteerHubError::from_registration_insert(e, event_id, volunteer_id))?;

        tx.commit().await?;
        Ok(registration)
    }

    /// Accept a pending registration
    ///
    /// Only a pending registration belonging to the given event qualifies; a
    /// missing, foreign, or already-decided one reports as not found. When the
    /// accept fills the event's last slot, every remaining pending registration
    /// is swept to rejected in the same transaction.
    pub async fn accept(
        &self,
        event_id: i64,
        registration_id: i64,
    ) -> Result<AcceptOutcome, VolunteerHubError> {
        let mut tx = self.pool.begin().await?;

        let event = self.lock_event(&mut tx, event_id).await?;

        let registration = sqlx::query_as::<_, Registration>(
            r#"
            UPDATE registrations
            SET status = $3
            WHERE id = $1 AND event_id = $2 AND status = $4
            RETURNING id, event_id, volunteer_id, contact_info, status, registered_at
            "#
        )
        .bind(registration_id)
        .bind(event_id)
        .bind(RegistrationStatus::Accepted)
        .bind(RegistrationStatus::Pending)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(VolunteerHubError::RegistrationNotFound { registration_id })?;

        let accepted = self.count_accepted_in_tx(&mut tx, event_id).await?;
        let closed = accepted >= i64::from(event.required_volunteers);

        let mut auto_rejected = 0;
        if closed {
            let swept = sqlx::query(
                "UPDATE registrations SET status = $2 WHERE event_id = $1 AND status = $3"
            )
            .bind(event_id)
            .bind(RegistrationStatus::Rejected)
            .bind(RegistrationStatus::Pending)
            .execute(&mut *tx)
            .await?;
            auto_rejected = swept.rows_affected();
        }

        tx.commit().await?;
        Ok(AcceptOutcome { registration, auto_rejected, closed })
    }

    /// Reject a pending registration
    ///
    /// Rejecting never changes capacity, so no event lock is taken; the
    /// guarded update is atomic on its own.
    pub async fn reject(
        &self,
        event_id: i64,
        registration_id: i64,
    ) -> Result<Registration, VolunteerHubError> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            UPDATE registrations
            SET status = $3
            WHERE id = $1 AND event_id = $2 AND status = $4
            RETURNING id, event_id, volunteer_id, contact_info, status, registered_at
            "#
        )
        .bind(registration_id)
        .bind(event_id)
        .bind(RegistrationStatus::Rejected)
        .bind(RegistrationStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;

        registration.ok_or(VolunteerHubError::RegistrationNotFound { registration_id })
    }

    /// Find registration by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Registration>, VolunteerHubError> {
        let registration = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, volunteer_id, contact_info, status, registered_at FROM registrations WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Find a volunteer's registration for an event, in any state
    pub async fn find_by_event_and_volunteer(
        &self,
        event_id: i64,
        volunteer_id: i64,
    ) -> Result<Option<Registration>, VolunteerHubError> {
        let registration = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, volunteer_id, contact_info, status, registered_at FROM registrations WHERE event_id = $1 AND volunteer_id = $2"
        )
        .bind(event_id)
        .bind(volunteer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Count accepted registrations for an event
    pub async fn count_accepted(&self, event_id: i64) -> Result<i64, VolunteerHubError> {
        self.count_by_status(event_id, RegistrationStatus::Accepted).await
    }

    /// Count pending registrations for an event
    pub async fn count_pending(&self, event_id: i64) -> Result<i64, VolunteerHubError> {
        self.count_by_status(event_id, RegistrationStatus::Pending).await
    }

    /// Count an event's registrations in a given state
    pub async fn count_by_status(
        &self,
        event_id: i64,
        status: RegistrationStatus,
    ) -> Result<i64, VolunteerHubError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status = $2"
        )
        .bind(event_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Count registrations in a given state across all events
    pub async fn count_total_by_status(
        &self,
        status: RegistrationStatus,
    ) -> Result<i64, VolunteerHubError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM registrations WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Pending registrations for an event, oldest submission first
    pub async fn list_pending(&self, event_id: i64) -> Result<Vec<Registration>, VolunteerHubError> {
        let registrations = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, volunteer_id, contact_info, status, registered_at FROM registrations WHERE event_id = $1 AND status = $2 ORDER BY registered_at ASC, id ASC"
        )
        .bind(event_id)
        .bind(RegistrationStatus::Pending)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Accepted registrations for an event, newest decision candidates first
    pub async fn list_accepted(&self, event_id: i64) -> Result<Vec<Registration>, VolunteerHubError> {
        let registrations = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, volunteer_id, contact_info, status, registered_at FROM registrations WHERE event_id = $1 AND status = $2 ORDER BY registered_at DESC, id DESC"
        )
        .bind(event_id)
        .bind(RegistrationStatus::Accepted)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Stream pending registrations for an event, oldest submission first
    ///
    /// Rows are fetched lazily; dropping the stream abandons the rest. Each
    /// call starts over from the current table state.
    pub fn stream_pending(
        &self,
        event_id: i64,
    ) -> BoxStream<'_, Result<Registration, VolunteerHubError>> {
        sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, volunteer_id, contact_info, status, registered_at FROM registrations WHERE event_id = $1 AND status = $2 ORDER BY registered_at ASC, id ASC"
        )
        .bind(event_id)
        .bind(RegistrationStatus::Pending)
        .fetch(&self.pool)
        .map_err(VolunteerHubError::from)
        .boxed()
    }

    /// Stream accepted registrations for an event, newest first
    pub fn stream_accepted(
        &self,
        event_id: i64,
    ) -> BoxStream<'_, Result<Registration, VolunteerHubError>> {
        sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, volunteer_id, contact_info, status, registered_at FROM registrations WHERE event_id = $1 AND status = $2 ORDER BY registered_at DESC, id DESC"
        )
        .bind(event_id)
        .bind(RegistrationStatus::Accepted)
        .fetch(&self.pool)
        .map_err(VolunteerHubError::from)
        .boxed()
    }

    async fn lock_event(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        event_id: i64,
    ) -> Result<Event, VolunteerHubError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, event_date, location, required_volunteers, image_filename, organizer_id, created_at, updated_at FROM events WHERE id = $1 FOR UPDATE"
        )
        .bind(event_id)
        .fetch_optional(&mut **tx)
        .await?;

        event.ok_or(VolunteerHubError::EventNotFound { event_id })
    }

    async fn count_accepted_in_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        event_id: i64,
    ) -> Result<i64, VolunteerHubError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status = $2"
        )
        .bind(event_id)
        .bind(RegistrationStatus::Accepted)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count.0)
    }
}
