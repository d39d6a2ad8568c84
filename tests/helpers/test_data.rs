//! Test data helpers for creating test objects
//!
//! This module provides generated users, events, and contact details so each
//! test works with unique rows.

use chrono::NaiveDate;
use fake::faker::address::en::CityName;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use uuid::Uuid;
use volunteerhub::models::event::CreateEventRequest;
use volunteerhub::models::user::{CreateUserRequest, Role};

/// A login that will not collide with other tests sharing the database
pub fn unique_login(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &id[..8])
}

pub fn user_request(login: &str, role: Role) -> CreateUserRequest {
    CreateUserRequest {
        login: login.to_string(),
        last_name: LastName().fake(),
        first_name: FirstName().fake(),
        middle_name: None,
        role,
    }
}

pub fn event_request(
    organizer_id: i64,
    event_date: NaiveDate,
    required_volunteers: i32,
) -> CreateEventRequest {
    let city: String = CityName().fake();
    CreateEventRequest {
        title: format!("Volunteer day in {}", city),
        description: Sentence(8..16).fake(),
        event_date,
        location: format!("{} community center", city),
        required_volunteers,
        image_filename: None,
        organizer_id,
    }
}

pub fn contact_info() -> String {
    PhoneNumber().fake()
}
