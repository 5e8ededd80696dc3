pub mod auth;
pub mod booking;
pub mod health;
pub mod index;
pub mod room;
pub mod teacher;
pub mod timetable;
