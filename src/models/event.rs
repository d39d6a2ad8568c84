//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Fallback image reference applied when an event is created without one.
pub const DEFAULT_EVENT_IMAGE: &str = "default_event.jpg";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    /// Markdown source, stored verbatim; rendering happens outside the core.
    pub description: String,
    pub event_date: NaiveDate,
    pub location: String,
    pub required_volunteers: i32,
    pub image_filename: String,
    pub organizer_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived registration state of an event.
///
/// A past date takes precedence over a filled capacity: once the event day
/// has gone by, the window reports `ClosedPast` no matter how many
/// volunteers were accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationWindow {
    /// The event date has passed.
    ClosedPast,
    /// All required volunteer slots are filled.
    ClosedFull,
    /// Volunteers can still apply.
    Open,
}

impl RegistrationWindow {
    pub fn is_open(&self) -> bool {
        matches!(self, RegistrationWindow::Open)
    }
}

impl Event {
    /// Evaluate the registration window for a given day and accepted count.
    ///
    /// `accepted_count` must come fresh from storage; it is never cached on
    /// the event row.
    pub fn registration_window(&self, today: NaiveDate, accepted_count: i64) -> RegistrationWindow {
        if self.event_date < today {
            RegistrationWindow::ClosedPast
        } else if accepted_count >= i64::from(self.required_volunteers) {
            RegistrationWindow::ClosedFull
        } else {
            RegistrationWindow::Open
        }
    }

    /// Whether a new registration can currently be submitted.
    pub fn is_registration_open(&self, today: NaiveDate, accepted_count: i64) -> bool {
        self.registration_window(today, accepted_count).is_open()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub location: String,
    pub required_volunteers: i32,
    pub image_filename: Option<String>,
    pub organizer_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub required_volunteers: Option<i32>,
    pub image_filename: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_event(event_date: NaiveDate, required_volunteers: i32) -> Event {
        Event {
            id: 1,
            title: "Park cleanup".to_string(),
            description: "Bring gloves".to_string(),
            event_date,
            location: "Riverside park".to_string(),
            required_volunteers,
            image_filename: DEFAULT_EVENT_IMAGE.to_string(),
            organizer_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_window_open_when_future_and_below_capacity() {
        let event = sample_event(day("2026-09-01"), 3);
        let today = day("2026-08-20");
        assert_eq!(event.registration_window(today, 2), RegistrationWindow::Open);
        assert!(event.is_registration_open(today, 2));
    }

    #[test]
    fn test_window_closed_when_capacity_reached() {
        let event = sample_event(day("2026-09-01"), 3);
        let today = day("2026-08-20");
        assert_eq!(event.registration_window(today, 3), RegistrationWindow::ClosedFull);
        assert!(!event.is_registration_open(today, 3));
    }

    #[test]
    fn test_past_date_takes_precedence_over_full_capacity() {
        let event = sample_event(day("2026-08-01"), 3);
        let today = day("2026-08-20");
        assert_eq!(event.registration_window(today, 5), RegistrationWindow::ClosedPast);
    }

    #[test]
    fn test_event_day_itself_is_not_past() {
        let event = sample_event(day("2026-08-20"), 3);
        let today = day("2026-08-20");
        assert_eq!(event.registration_window(today, 0), RegistrationWindow::Open);
    }

    proptest! {
        #[test]
        fn prop_window_classification(
            date_offset in -400i64..400,
            accepted in 0i64..2000,
            required in 1i32..1000,
        ) {
            let today = day("2026-08-20");
            let event_date = today + chrono::Duration::days(date_offset);
            let event = sample_event(event_date, required);
            let window = event.registration_window(today, accepted);

            if event_date < today {
                prop_assert_eq!(window, RegistrationWindow::ClosedPast);
            } else if accepted >= i64::from(required) {
                prop_assert_eq!(window, RegistrationWindow::ClosedFull);
            } else {
                prop_assert_eq!(window, RegistrationWindow::Open);
            }

            // Open always implies a free slot and a date that has not passed.
            if window.is_open() {
                prop_assert!(accepted < i64::from(required));
                prop_assert!(event_date >= today);
            }
        }
    }
}
