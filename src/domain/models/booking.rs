use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Booking {
    pub id: i64,
    pub teacher_id: i64,
    pub room_id: i64,
    pub lesson: i64,
    pub date: NaiveDate,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

/// A booking that passed every field check and can be written as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub teacher_id: i64,
    pub room_id: i64,
    pub lesson: i64,
    pub date: NaiveDate,
    pub size: i64,
}

/// Raw booking form. Values stay as text until validated so that a missing
/// field and a malformed one can be told apart.
#[derive(Debug, Default, Clone)]
pub struct BookingForm {
    pub id: Option<String>,
    pub teacher: Option<String>,
    pub size: Option<String>,
    pub room: Option<String>,
    pub date: Option<String>,
    pub lesson: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookingOutcome {
    pub booking_id: i64,
    pub room_id: i64,
}
