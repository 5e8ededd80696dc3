use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::ajax_json::AjaxJson;
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::api::dtos::requests::{id_text, BookingRequest, RemoveBookingRequest};
use crate::api::dtos::responses::WriteResponse;
use crate::api::views::{page_context, render};
use crate::domain::models::booking::{Booking, BookingForm, BookingMode};
use crate::domain::models::auth::SessionUser;
use crate::error::{AppError, FormError};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tera::Context;

#[derive(Serialize)]
struct BookingRow {
    id: i64,
    date: NaiveDate,
    lesson: i64,
    size: i64,
    room: String,
    teacher: String,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_all().await?;
    let rooms: HashMap<i64, String> = state.room_repo.list_by_name().await?
        .into_iter()
        .map(|r| (r.id, r.name))
        .collect();
    let teachers: HashMap<i64, String> = state.teacher_repo.list_by_last_name().await?
        .into_iter()
        .map(|t| (t.id, t.display_name()))
        .collect();

    let rows: Vec<BookingRow> = bookings.into_iter()
        .map(|b| BookingRow {
            id: b.id,
            date: b.date,
            lesson: b.lesson,
            size: b.size,
            room: rooms.get(&b.room_id).cloned().unwrap_or_else(|| "unknown".to_string()),
            teacher: teachers.get(&b.teacher_id).cloned().unwrap_or_else(|| "unknown".to_string()),
        })
        .collect();

    let mut ctx = page_context(Some(&user), "bookings");
    ctx.insert("bookings", &rows);
    render(&state, "bookings.html", &ctx)
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let room = state.room_repo.find_by_id(booking.room_id).await?;
    let teacher = state.teacher_repo.find_by_id(booking.teacher_id).await?;

    let mut ctx = page_context(Some(&user), "timetable");
    ctx.insert("booking", &booking);
    ctx.insert("room", &room);
    ctx.insert("teacher", &teacher);
    render(&state, "booking.html", &ctx)
}

pub async fn add_booking_page(
    State(state): State<Arc<AppState>>,
    AdminUser(user): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = form_context(&state, &user, None, None).await?;
    render(&state, "booking_form.html", &ctx)
}

pub async fn add_booking_for_room_page(
    State(state): State<Arc<AppState>>,
    AdminUser(user): AdminUser,
    Path(room_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = form_context(&state, &user, None, Some(room_id)).await?;
    render(&state, "booking_form.html", &ctx)
}

pub async fn edit_booking_page(
    State(state): State<Arc<AppState>>,
    AdminUser(user): AdminUser,
    Path(booking_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    let room_id = booking.room_id;
    let ctx = form_context(&state, &user, Some(booking), Some(room_id)).await?;
    render(&state, "booking_form.html", &ctx)
}

/// Rooms, teachers and lessons to choose from. `booking` is null for a new booking.
async fn form_context(
    state: &AppState,
    user: &SessionUser,
    booking: Option<Booking>,
    selected_room: Option<i64>,
) -> Result<Context, AppError> {
    let rooms = state.room_repo.list_by_name().await?;
    let teachers = state.teacher_repo.list_by_last_name().await?;
    let lessons: Vec<i64> = (1..=state.booking_service.lessons_per_day()).collect();

    let mut ctx = page_context(Some(user), "timetable");
    ctx.insert("booking", &booking);
    ctx.insert("rooms", &rooms);
    ctx.insert("teachers", &teachers);
    ctx.insert("selected_room", &selected_room);
    ctx.insert("today", &state.booking_service.today().format("%Y-%m-%d").to_string());
    ctx.insert("lessons", &lessons);
    Ok(ctx)
}

pub async fn add_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    AjaxJson(payload): AjaxJson<BookingRequest>,
) -> Result<Json<WriteResponse>, FormError> {
    let form: BookingForm = payload.into();
    let outcome = state.booking_service.propose(&form, BookingMode::Create).await?;
    Ok(Json(WriteResponse::ok().with_booking(outcome.booking_id, outcome.room_id)))
}

pub async fn edit_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    AjaxJson(payload): AjaxJson<BookingRequest>,
) -> Result<Json<WriteResponse>, FormError> {
    let form: BookingForm = payload.into();
    let outcome = state.booking_service.propose(&form, BookingMode::Edit).await?;
    Ok(Json(WriteResponse::ok().with_booking(outcome.booking_id, outcome.room_id)))
}

pub async fn remove_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    AjaxJson(payload): AjaxJson<RemoveBookingRequest>,
) -> Result<Json<WriteResponse>, FormError> {
    state.booking_service.remove(&id_text(payload.id)).await?;
    Ok(Json(WriteResponse::ok()))
}
