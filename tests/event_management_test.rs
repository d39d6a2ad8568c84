//! Integration tests for the event catalogue
//!
//! These tests cover event CRUD, validation, the paginated upcoming listing,
//! and the aggregate overview counts.

mod helpers;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use helpers::*;
use serial_test::serial;
use volunteerhub::models::event::{
    CreateEventRequest, RegistrationWindow, UpdateEventRequest, DEFAULT_EVENT_IMAGE,
};
use volunteerhub::models::registration::RegistrationStatus;
use volunteerhub::models::user::Role;
use volunteerhub::services::{EventService, Identity, RegistrationLedger, ServiceFactory};
use volunteerhub::utils::helpers::current_date;
use volunteerhub::VolunteerHubError;

#[tokio::test]
#[serial]
async fn test_create_event_persists_fields() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let organizer = db.create_test_user(Role::Administrator).await;
    let service = EventService::new(db.events());

    let event_date = current_date() + Duration::days(14);
    let request = CreateEventRequest {
        title: "Городской субботник".to_string(),
        description: "Уборка аллей и посадка деревьев в центральном парке".to_string(),
        event_date,
        location: "Центральный парк".to_string(),
        required_volunteers: 10,
        image_filename: None,
        organizer_id: organizer.id,
    };

    let event = service.create_event(request).await.expect("Failed to create event");

    assert_eq!(event.title, "Городской субботник");
    assert_eq!(event.event_date, event_date);
    assert_eq!(event.location, "Центральный парк");
    assert_eq!(event.required_volunteers, 10);
    assert_eq!(event.organizer_id, organizer.id);
    // No image given, the default placeholder applies
    assert_eq!(event.image_filename, DEFAULT_EVENT_IMAGE);

    let fetched = service.fetch(event.id).await.expect("Failed to fetch event");
    assert_eq!(fetched.title, event.title);
    assert_eq!(fetched.description, event.description);
}

#[tokio::test]
#[serial]
async fn test_create_event_validates_fields() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let organizer = db.create_test_user(Role::Administrator).await;
    let service = EventService::new(db.events());
    let event_date = current_date() + Duration::days(7);

    let mut request = event_request(organizer.id, event_date, 5);
    request.title = "ab".to_string();
    let result = service.create_event(request).await;
    assert_matches!(result, Err(VolunteerHubError::InvalidInput(_)));

    let mut request = event_request(organizer.id, event_date, 5);
    request.description = "short".to_string();
    let result = service.create_event(request).await;
    assert_matches!(result, Err(VolunteerHubError::InvalidInput(_)));

    let mut request = event_request(organizer.id, event_date, 5);
    request.location = "xy".to_string();
    let result = service.create_event(request).await;
    assert_matches!(result, Err(VolunteerHubError::InvalidInput(_)));

    let request = event_request(organizer.id, event_date, 0);
    let result = service.create_event(request).await;
    assert_matches!(result, Err(VolunteerHubError::InvalidInput(_)));
}

#[tokio::test]
#[serial]
async fn test_create_event_requires_known_organizer() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let service = EventService::new(db.events());

    let request = event_request(i64::MAX, current_date() + Duration::days(7), 5);
    let result = service.create_event(request).await;
    assert_matches!(result, Err(VolunteerHubError::ConstraintViolation(_)));
}

#[tokio::test]
#[serial]
async fn test_update_event_changes_only_given_fields() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let organizer = db.create_test_user(Role::Administrator).await;
    let service = EventService::new(db.events());
    let event = db
        .create_test_event(organizer.id, current_date() + Duration::days(7), 5)
        .await;

    let updated = service
        .update_event(
            event.id,
            UpdateEventRequest {
                location: Some("Приют «Верный друг»".to_string()),
                required_volunteers: Some(3),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update event");

    assert_eq!(updated.location, "Приют «Верный друг»");
    assert_eq!(updated.required_volunteers, 3);
    // Untouched fields survive the partial update
    assert_eq!(updated.title, event.title);
    assert_eq!(updated.description, event.description);
    assert_eq!(updated.event_date, event.event_date);
    assert!(updated.updated_at >= event.updated_at);

    // Invalid values are refused before touching the row
    let result = service
        .update_event(
            event.id,
            UpdateEventRequest {
                required_volunteers: Some(0),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(result, Err(VolunteerHubError::InvalidInput(_)));

    let kept = service.fetch(event.id).await.unwrap();
    assert_eq!(kept.required_volunteers, 3);

    // Unknown event id
    let result = service
        .update_event(
            i64::MAX,
            UpdateEventRequest {
                title: Some("Новое название".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(result, Err(VolunteerHubError::EventNotFound { .. }));
}

#[tokio::test]
#[serial]
async fn test_delete_event_cascades_registrations() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let organizer = db.create_test_user(Role::Administrator).await;
    let anna = db.create_test_user(Role::Volunteer).await;
    let boris = db.create_test_user(Role::Volunteer).await;
    let service = EventService::new(db.events());

    let doomed = db
        .create_test_event(organizer.id, current_date() + Duration::days(7), 5)
        .await;
    let survivor = db
        .create_test_event(organizer.id, current_date() + Duration::days(8), 5)
        .await;

    let doomed_registration = db
        .create_registration_at(doomed.id, anna.id, RegistrationStatus::Pending, Utc::now())
        .await;
    let kept_registration = db
        .create_registration_at(survivor.id, boris.id, RegistrationStatus::Pending, Utc::now())
        .await;

    service.delete_event(doomed.id).await.expect("Failed to delete event");

    assert!(service.find(doomed.id).await.unwrap().is_none());
    let registrations = db.registrations();
    assert!(registrations.find_by_id(doomed_registration.id).await.unwrap().is_none());

    // The other event and its registration are untouched
    assert!(service.find(survivor.id).await.unwrap().is_some());
    assert!(registrations.find_by_id(kept_registration.id).await.unwrap().is_some());

    // Deleting again reports the event as missing
    let result = service.delete_event(doomed.id).await;
    assert_matches!(result, Err(VolunteerHubError::EventNotFound { .. }));
}

#[tokio::test]
#[serial]
async fn test_capacity_can_drop_below_accepted() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let organizer = db.create_test_user(Role::Administrator).await;
    let anna = db.create_test_user(Role::Volunteer).await;
    let boris = db.create_test_user(Role::Volunteer).await;
    let service = EventService::new(db.events());
    let event = db
        .create_test_event(organizer.id, current_date() + Duration::days(7), 3)
        .await;

    db.create_registration_at(event.id, anna.id, RegistrationStatus::Accepted, Utc::now())
        .await;
    db.create_registration_at(event.id, boris.id, RegistrationStatus::Accepted, Utc::now())
        .await;

    // Shrinking capacity below the accepted count is allowed; accepted
    // registrations stay accepted and the event simply reports full
    let updated = service
        .update_event(
            event.id,
            UpdateEventRequest {
                required_volunteers: Some(1),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update event");
    assert_eq!(updated.required_volunteers, 1);

    let ledger = RegistrationLedger::new(db.registrations());
    assert_eq!(ledger.accepted_count(event.id).await.unwrap(), 2);
    let window = ledger.registration_window(&updated).await.unwrap();
    assert_eq!(window, RegistrationWindow::ClosedFull);

    let late = db.create_test_user(Role::Volunteer).await;
    let result = ledger
        .submit_registration(&Identity::from_user(&late), event.id, contact_info())
        .await;
    assert_matches!(result, Err(VolunteerHubError::RegistrationClosed { .. }));
}

#[tokio::test]
#[serial]
async fn test_upcoming_pagination() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to clean test database");

    let service = EventService::new(db.events());

    // Empty catalogue still yields a well-formed first page
    let empty = service.upcoming(3, 10).await.expect("Failed to list events");
    assert!(empty.items.is_empty());
    assert_eq!(empty.page, 1);
    assert_eq!(empty.total_items, 0);
    assert_eq!(empty.total_pages, 0);
    assert!(!empty.has_prev());
    assert!(!empty.has_next());

    let organizer = db.create_test_user(Role::Administrator).await;
    let today = current_date();

    // One finished event and twelve upcoming ones, today included
    db.create_test_event(organizer.id, today - Duration::days(1), 5).await;
    for offset in 0..12i64 {
        db.create_test_event(organizer.id, today + Duration::days(offset), 5).await;
    }

    let first_page = service.upcoming(1, 10).await.expect("Failed to list events");
    assert_eq!(first_page.items.len(), 10);
    assert_eq!(first_page.total_items, 12);
    assert_eq!(first_page.total_pages, 2);
    assert_eq!(first_page.per_page, 10);
    assert!(!first_page.has_prev());
    assert!(first_page.has_next());

    let second_page = service.upcoming(2, 10).await.expect("Failed to list events");
    assert_eq!(second_page.items.len(), 2);
    assert!(second_page.has_prev());
    assert!(!second_page.has_next());

    // Soonest first across pages, the finished event excluded
    let mut dates: Vec<_> = first_page.items.iter().map(|e| e.event_date).collect();
    dates.extend(second_page.items.iter().map(|e| e.event_date));
    let expected: Vec<_> = (0..12i64).map(|offset| today + Duration::days(offset)).collect();
    assert_eq!(dates, expected);

    // Out-of-range page numbers clamp to the last page instead of going empty
    let clamped = service.upcoming(99, 10).await.expect("Failed to list events");
    assert_eq!(clamped.page, 2);
    assert_eq!(clamped.items.len(), 2);

    let clamped = service.upcoming(0, 10).await.expect("Failed to list events");
    assert_eq!(clamped.page, 1);
    assert_eq!(clamped.items.len(), 10);
}

#[tokio::test]
#[serial]
async fn test_fetch_vs_find_for_missing_event() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let service = EventService::new(db.events());

    let result = service.fetch(i64::MAX).await;
    assert_matches!(result, Err(VolunteerHubError::EventNotFound { .. }));

    let found = service.find(i64::MAX).await.expect("Lookup should not fail");
    assert!(found.is_none());
}

#[tokio::test]
#[serial]
async fn test_overview_aggregates_counts() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to clean test database");

    let organizer = db.create_test_user(Role::Administrator).await;
    let _moderator = db.create_test_user(Role::Moderator).await;
    let anna = db.create_test_user(Role::Volunteer).await;
    let boris = db.create_test_user(Role::Volunteer).await;

    let upcoming = db
        .create_test_event(organizer.id, current_date() + Duration::days(7), 5)
        .await;
    db.create_test_event(organizer.id, current_date() - Duration::days(7), 5).await;

    db.create_registration_at(upcoming.id, anna.id, RegistrationStatus::Pending, Utc::now())
        .await;
    db.create_registration_at(upcoming.id, boris.id, RegistrationStatus::Accepted, Utc::now())
        .await;

    let factory = ServiceFactory::new(db.users(), db.events(), db.registrations());
    let overview = factory.overview().await.expect("Failed to build overview");

    assert_eq!(overview["users"]["total"], 4);
    assert_eq!(overview["users"]["administrators"], 1);
    assert_eq!(overview["users"]["moderators"], 1);
    assert_eq!(overview["users"]["volunteers"], 2);
    assert_eq!(overview["events"]["total"], 2);
    assert_eq!(overview["events"]["upcoming"], 1);
    assert_eq!(overview["registrations"]["pending"], 1);
    assert_eq!(overview["registrations"]["accepted"], 1);
    assert_eq!(overview["registrations"]["rejected"], 0);
}
