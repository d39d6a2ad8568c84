//! Event service implementation
//!
//! Create, edit, delete, and list events. Field bounds mirror the database
//! schema; callers authorize the acting identity before invoking these.

use tracing::{debug, info};
use crate::database::repositories::EventRepository;
use crate::models::event::{Event, CreateEventRequest, UpdateEventRequest};
use crate::utils::errors::{VolunteerHubError, Result};
use crate::utils::helpers::{calculate_offset, current_date, page_count, Page};
use crate::utils::logging::log_event_action;

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 200;
const DESCRIPTION_MIN: usize = 10;
const LOCATION_MIN: usize = 3;
const LOCATION_MAX: usize = 200;

/// Event service for managing the event catalogue
#[derive(Clone)]
pub struct EventService {
    event_repository: EventRepository,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(event_repository: EventRepository) -> Self {
        Self { event_repository }
    }

    /// Create a new event
    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        debug!(title = %request.title, organizer_id = request.organizer_id, "Creating event");

        validate_title(&request.title)?;
        validate_description(&request.description)?;
        validate_location(&request.location)?;
        validate_required_volunteers(request.required_volunteers)?;

        let event = self.event_repository.create(request).await?;
        log_event_action(event.id, "create", &event.title);

        Ok(event)
    }

    /// Update event fields present in the request
    pub async fn update_event(&self, event_id: i64, request: UpdateEventRequest) -> Result<Event> {
        debug!(event_id = event_id, "Updating event");

        if let Some(ref title) = request.title {
            validate_title(title)?;
        }
        if let Some(ref description) = request.description {
            validate_description(description)?;
        }
        if let Some(ref location) = request.location {
            validate_location(location)?;
        }
        if let Some(required) = request.required_volunteers {
            validate_required_volunteers(required)?;
        }

        let event = self.event_repository.update(event_id, request).await?;
        log_event_action(event.id, "update", &event.title);

        Ok(event)
    }

    /// Delete an event together with its registrations
    pub async fn delete_event(&self, event_id: i64) -> Result<()> {
        debug!(event_id = event_id, "Deleting event");

        self.event_repository.delete(event_id).await?;
        info!(event_id = event_id, "Event deleted");

        Ok(())
    }

    /// Get event by ID, or an error when it does not exist
    pub async fn fetch(&self, event_id: i64) -> Result<Event> {
        self.event_repository
            .find_by_id(event_id)
            .await?
            .ok_or(VolunteerHubError::EventNotFound { event_id })
    }

    /// Get event by ID
    pub async fn find(&self, event_id: i64) -> Result<Option<Event>> {
        self.event_repository.find_by_id(event_id).await
    }

    /// Page through events happening today or later, soonest first
    ///
    /// Page numbers are 1-based and clamped to the available range, so a
    /// stale page link lands on the last page instead of an empty one.
    pub async fn upcoming(&self, page: u32, per_page: u32) -> Result<Page<Event>> {
        let today = current_date();
        let total_items = self.event_repository.count_upcoming(today).await?;
        let total_pages = page_count(total_items, per_page);
        let page = page.clamp(1, total_pages.max(1));

        let items = self
            .event_repository
            .list_upcoming(today, i64::from(per_page), calculate_offset(page, per_page))
            .await?;

        Ok(Page {
            items,
            page,
            per_page,
            total_items,
            total_pages,
        })
    }
}

fn validate_title(title: &str) -> Result<()> {
    let length = title.trim().chars().count();
    if !(TITLE_MIN..=TITLE_MAX).contains(&length) {
        return Err(VolunteerHubError::InvalidInput(format!(
            "Title must be between {} and {} characters",
            TITLE_MIN, TITLE_MAX
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().chars().count() < DESCRIPTION_MIN {
        return Err(VolunteerHubError::InvalidInput(format!(
            "Description must be at least {} characters",
            DESCRIPTION_MIN
        )));
    }
    Ok(())
}

fn validate_location(location: &str) -> Result<()> {
    let length = location.trim().chars().count();
    if !(LOCATION_MIN..=LOCATION_MAX).contains(&length) {
        return Err(VolunteerHubError::InvalidInput(format!(
            "Location must be between {} and {} characters",
            LOCATION_MIN, LOCATION_MAX
        )));
    }
    Ok(())
}

fn validate_required_volunteers(required: i32) -> Result<()> {
    if required < 1 {
        return Err(VolunteerHubError::InvalidInput(
            "At least one volunteer slot is required".to_string(),
        ));
    }
    Ok(())
}
