//! Test helpers module
//!
//! This module provides utilities and helpers for testing the VolunteerHub
//! library against a real PostgreSQL database.

pub mod database_helper;
pub mod test_data;

pub use database_helper::*;
pub use test_data::*;
