//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{NaiveDate, Utc};
use serde::Serialize;

/// Today's date in UTC, the reference point for registration windows
pub fn current_date() -> NaiveDate {
    Utc::now().date_naive()
}

/// One page of an offset-paginated listing
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Calculate pagination offset for a 1-based page number
pub fn calculate_offset(page: u32, per_page: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(per_page)
}

/// Number of pages needed for `total_items` at `per_page` each
pub fn page_count(total_items: i64, per_page: u32) -> u32 {
    let per_page = i64::from(per_page).max(1);
    ((total_items + per_page - 1) / per_page) as u32
}
