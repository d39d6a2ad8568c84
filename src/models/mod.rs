//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod event;
pub mod registration;

// Re-export commonly used models
pub use user::{User, Role, CreateUserRequest};
pub use event::{Event, RegistrationWindow, CreateEventRequest, UpdateEventRequest, DEFAULT_EVENT_IMAGE};
pub use registration::{Registration, RegistrationStatus, SubmitRegistrationRequest, AcceptOutcome};
