use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::domain::models::booking::{BookingForm, BookingMode, BookingOutcome, NewBooking};
use crate::domain::ports::{BookingRepository, RoomRepository, TeacherRepository};
use crate::domain::services::fields::{parse_date, parse_int, present, require_all};
use crate::error::{AppError, FormError};

pub const MIN_CLASS_SIZE: i64 = 1;
pub const MAX_CLASS_SIZE: i64 = 100;

/// A booking form that passed the checks needing no storage access.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedForm {
    pub existing_id: Option<i64>,
    pub booking: NewBooking,
}

/// Field checks of the booking pipeline that need no storage access, in
/// order, first failure wins. The lesson range comes last.
pub fn check_form(
    form: &BookingForm,
    mode: BookingMode,
    today: NaiveDate,
    lessons_per_day: i64,
    tz: Tz,
) -> Result<CheckedForm, FormError> {
    require_all(&[&form.teacher, &form.size, &form.room, &form.date, &form.lesson])?;
    if mode == BookingMode::Edit {
        require_all(&[&form.id])?;
    }

    let teacher_id = parse_int(&form.teacher, "teacher")?;
    let size = parse_int(&form.size, "class size")?;
    let room_id = parse_int(&form.room, "room")?;
    let lesson = parse_int(&form.lesson, "lesson")?;
    let existing_id = match mode {
        BookingMode::Create => None,
        BookingMode::Edit => Some(parse_int(&form.id, "booking")?),
    };

    if !(MIN_CLASS_SIZE..=MAX_CLASS_SIZE).contains(&size) {
        return Err(FormError::SizeOutOfRange);
    }

    let date = parse_date(present(&form.date).unwrap_or_default(), tz)?;
    if date < today {
        return Err(FormError::DateInPast);
    }

    if !(1..=lessons_per_day).contains(&lesson) {
        return Err(FormError::InvalidField("lesson"));
    }

    Ok(CheckedForm {
        existing_id,
        booking: NewBooking { teacher_id, room_id, lesson, date, size },
    })
}

/// Validates and writes bookings. Every check runs against the stored rooms,
/// teachers and bookings; the unique slot index settles any race between two
/// requests that both passed the slot check.
pub struct BookingService {
    rooms: Arc<dyn RoomRepository>,
    teachers: Arc<dyn TeacherRepository>,
    bookings: Arc<dyn BookingRepository>,
    timezone: Tz,
    lessons_per_day: i64,
}

impl BookingService {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        teachers: Arc<dyn TeacherRepository>,
        bookings: Arc<dyn BookingRepository>,
        timezone: Tz,
        lessons_per_day: i64,
    ) -> Self {
        Self { rooms, teachers, bookings, timezone, lessons_per_day }
    }

    /// Current calendar day in the school's timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    pub fn lessons_per_day(&self) -> i64 {
        self.lessons_per_day
    }

    pub async fn propose(&self, form: &BookingForm, mode: BookingMode) -> Result<BookingOutcome, FormError> {
        let checked = check_form(form, mode, self.today(), self.lessons_per_day, self.timezone)?;
        let booking = checked.booking;

        let room = self.rooms.find_by_id(booking.room_id).await
            .map_err(|e| FormError::unexpected(e, "looking up a room"))?
            .ok_or(FormError::InvalidRoom)?;

        if room.capacity < booking.size {
            return Err(FormError::RoomTooSmall);
        }

        self.teachers.find_by_id(booking.teacher_id).await
            .map_err(|e| FormError::unexpected(e, "looking up a teacher"))?
            .ok_or(FormError::InvalidTeacher)?;

        if let Some(id) = checked.existing_id {
            self.bookings.find_by_id(id).await
                .map_err(|e| FormError::unexpected(e, "looking up a booking"))?
                .ok_or(FormError::NotFound("booking"))?;
        }

        let occupant = self.bookings.find_by_slot(booking.room_id, booking.date, booking.lesson).await
            .map_err(|e| FormError::unexpected(e, "checking for an existing booking"))?;

        if let Some(occupant) = occupant
            && Some(occupant.id) != checked.existing_id {
            warn!(
                room_id = booking.room_id, date = %booking.date, lesson = booking.lesson,
                "Booking rejected: slot held by booking {}", occupant.id
            );
            return Err(FormError::SlotTaken);
        }

        let written = match checked.existing_id {
            None => self.bookings.create(&booking).await
                .map_err(|e| FormError::from_persistence(e, FormError::SlotTaken, "creating a booking"))?,
            Some(id) => self.bookings.update(id, &booking).await
                .map_err(|e| match e {
                    AppError::NotFound(_) => FormError::NotFound("booking"),
                    other => FormError::from_persistence(other, FormError::SlotTaken, "editing a booking"),
                })?,
        };

        info!(
            booking_id = written.id, room_id = written.room_id, date = %written.date, lesson = written.lesson,
            "Booking {}", if mode == BookingMode::Create { "created" } else { "updated" }
        );
        Ok(BookingOutcome { booking_id: written.id, room_id: written.room_id })
    }

    pub async fn remove(&self, id: &Option<String>) -> Result<(), FormError> {
        let id = parse_int(id, "booking")?;
        self.bookings.delete(id).await.map_err(|e| match e {
            AppError::NotFound(_) => FormError::NotFound("booking"),
            other => FormError::unexpected(other, "removing a booking"),
        })?;
        info!("Booking removed: {}", id);
        Ok(())
    }
}
