//! Event repository implementation

use sqlx::PgPool;
use chrono::{NaiveDate, Utc};
use crate::models::event::{Event, CreateEventRequest, UpdateEventRequest, DEFAULT_EVENT_IMAGE};
use crate::utils::errors::VolunteerHubError;

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, VolunteerHubError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, event_date, location, required_volunteers, image_filename, organizer_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, event_date, location, required_volunteers, image_filename, organizer_id, created_at, updated_at
            "#
        )
        .bind(request.title)
        .bind(request.description)
        .bind(request.event_date)
        .bind(request.location)
        .bind(request.required_volunteers)
        .bind(request.image_filename.unwrap_or_else(|| DEFAULT_EVENT_IMAGE.to_string()))
        .bind(request.organizer_id)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(VolunteerHubError::from_database)?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, VolunteerHubError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, event_date, location, required_volunteers, image_filename, organizer_id, created_at, updated_at FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update event fields that are present in the request
    pub async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<Event, VolunteerHubError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_date = COALESCE($4, event_date),
                location = COALESCE($5, location),
                required_volunteers = COALESCE($6, required_volunteers),
                image_filename = COALESCE($7, image_filename),
                updated_at = $8
            WHERE id = $1
            RETURNING id, title, description, event_date, location, required_volunteers, image_filename, organizer_id, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.event_date)
        .bind(request.location)
        .bind(request.required_volunteers)
        .bind(request.image_filename)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(VolunteerHubError::from_database)?;

        event.ok_or(VolunteerHubError::EventNotFound { event_id: id })
    }

    /// Delete event, cascading to its registrations
    pub async fn delete(&self, id: i64) -> Result<(), VolunteerHubError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(VolunteerHubError::EventNotFound { event_id: id });
        }

        Ok(())
    }

    /// List events happening on `today` or later, soonest first, with pagination
    pub async fn list_upcoming(
        &self,
        today: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, VolunteerHubError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, event_date, location, required_volunteers, image_filename, organizer_id, created_at, updated_at FROM events WHERE event_date >= $1 ORDER BY event_date ASC, id ASC LIMIT $2 OFFSET $3"
        )
        .bind(today)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Count events happening on `today` or later
    pub async fn count_upcoming(&self, today: NaiveDate) -> Result<i64, VolunteerHubError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events WHERE event_date >= $1")
            .bind(today)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, VolunteerHubError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
