pub mod auth_service;
pub mod booking_service;
pub mod fields;
pub mod roster_service;
pub mod timetable;
