use crate::domain::models::{
    booking::{Booking, NewBooking},
    room::Room,
    teacher::{Teacher, TeacherFields},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, name: &str, capacity: i64) -> Result<Room, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Room>, AppError>;
    async fn list_by_name(&self) -> Result<Vec<Room>, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn create(&self, fields: &TeacherFields) -> Result<Teacher, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>, AppError>;
    async fn list_by_last_name(&self) -> Result<Vec<Teacher>, AppError>;
    async fn update(&self, id: i64, fields: &TeacherFields) -> Result<Teacher, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &NewBooking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError>;
    async fn find_by_slot(&self, room_id: i64, date: NaiveDate, lesson: i64) -> Result<Option<Booking>, AppError>;
    /// Bookings of one room with `start <= date < end`.
    async fn list_by_room_between(&self, room_id: i64, start: NaiveDate, end: NaiveDate) -> Result<Vec<Booking>, AppError>;
    async fn list_all(&self) -> Result<Vec<Booking>, AppError>;
    async fn update(&self, id: i64, booking: &NewBooking) -> Result<Booking, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
