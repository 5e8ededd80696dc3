use crate::domain::{models::booking::{Booking, NewBooking}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::{NaiveDate, Utc};

const COLUMNS: &str = "id, teacher_id, room_id, lesson, date, size, created_at";

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &NewBooking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(&format!(
            "INSERT INTO bookings (teacher_id, room_id, lesson, date, size, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        ))
            .bind(booking.teacher_id).bind(booking.room_id).bind(booking.lesson)
            .bind(booking.date).bind(booking.size).bind(Utc::now())
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(&format!("SELECT {COLUMNS} FROM bookings WHERE id = ?")).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_slot(&self, room_id: i64, date: NaiveDate, lesson: i64) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(&format!("SELECT {COLUMNS} FROM bookings WHERE room_id = ? AND date = ? AND lesson = ? LIMIT 1"))
            .bind(room_id).bind(date).bind(lesson)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_room_between(&self, room_id: i64, start: NaiveDate, end: NaiveDate) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(&format!(
            "SELECT {COLUMNS} FROM bookings WHERE room_id = ? AND date >= ? AND date < ? ORDER BY date ASC, lesson ASC"
        ))
            .bind(room_id).bind(start).bind(end)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(&format!("SELECT {COLUMNS} FROM bookings ORDER BY date ASC, lesson ASC")).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, id: i64, booking: &NewBooking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(&format!(
            "UPDATE bookings SET teacher_id=?, lesson=?, date=?, room_id=?, size=?
             WHERE id=?
             RETURNING {COLUMNS}"
        ))
            .bind(booking.teacher_id).bind(booking.lesson).bind(booking.date)
            .bind(booking.room_id).bind(booking.size)
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Booking not found".into())); }
        Ok(())
    }
}
