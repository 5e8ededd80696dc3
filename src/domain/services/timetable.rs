use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::models::{booking::Booking, teacher::Teacher};

/// Weeks further away than this are clamped.
pub const MAX_WEEK_OFFSET: i64 = 5000;
pub const SCHOOL_DAYS: i64 = 5;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub label: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BookedCell {
    pub booking_id: i64,
    pub size: i64,
    pub teacher: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LessonRow {
    pub lesson: i64,
    pub cells: Vec<Option<BookedCell>>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct WeekView {
    pub week: i64,
    pub week_start: NaiveDate,
    pub days: Vec<DayColumn>,
    pub rows: Vec<LessonRow>,
}

/// Monday of the week `week` weeks away from the one containing `today`.
pub fn week_start(today: NaiveDate, week: i64) -> NaiveDate {
    let week = week.clamp(-MAX_WEEK_OFFSET, MAX_WEEK_OFFSET);
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    monday + Duration::weeks(week)
}

/// Lays out one room's bookings as a lesson-by-weekday grid. Bookings outside
/// the week or the school day are ignored.
pub fn build_week(
    today: NaiveDate,
    week: i64,
    lessons_per_day: i64,
    bookings: &[Booking],
    teachers: &[Teacher],
) -> WeekView {
    let week = week.clamp(-MAX_WEEK_OFFSET, MAX_WEEK_OFFSET);
    let start = week_start(today, week);

    let days: Vec<DayColumn> = (0..SCHOOL_DAYS)
        .map(|offset| {
            let date = start + Duration::days(offset);
            DayColumn { date, label: date.format("%a %d/%m").to_string() }
        })
        .collect();

    let names: HashMap<i64, String> = teachers.iter().map(|t| (t.id, t.display_name())).collect();

    let mut grid: HashMap<(NaiveDate, i64), &Booking> = HashMap::new();
    for booking in bookings {
        grid.insert((booking.date, booking.lesson), booking);
    }

    let rows = (1..=lessons_per_day)
        .map(|lesson| LessonRow {
            lesson,
            cells: days
                .iter()
                .map(|day| {
                    grid.get(&(day.date, lesson)).map(|b| BookedCell {
                        booking_id: b.id,
                        size: b.size,
                        teacher: names.get(&b.teacher_id).cloned().unwrap_or_else(|| "unknown".to_string()),
                    })
                })
                .collect(),
        })
        .collect();

    WeekView { week, week_start: start, days, rows }
}
