use axum::{extract::{State, Path}, response::IntoResponse};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::views::{page_context, render};
use crate::domain::models::auth::SessionUser;
use crate::domain::services::timetable::{build_week, week_start};
use crate::error::AppError;
use chrono::Duration;
use std::sync::Arc;
use axum::response::Html;
use tracing::debug;

pub async fn room_picker(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let rooms = state.room_repo.list_by_name().await?;
    let mut ctx = page_context(Some(&user), "timetable");
    ctx.insert("view", &None::<()>);
    ctx.insert("rooms", &rooms);
    render(&state, "timetable.html", &ctx)
}

pub async fn current_week(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(room_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    room_week(&state, &user, room_id, 0).await
}

pub async fn other_week(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path((room_id, week)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    room_week(&state, &user, room_id, week).await
}

async fn room_week(state: &AppState, user: &SessionUser, room_id: i64, week: i64) -> Result<Html<String>, AppError> {
    let room = state.room_repo.find_by_id(room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    let today = state.booking_service.today();
    let start = week_start(today, week);
    let end = start + Duration::weeks(1);

    let bookings = state.booking_repo.list_by_room_between(room.id, start, end).await?;
    let teachers = state.teacher_repo.list_by_last_name().await?;
    debug!("Timetable for room {} from {}: {} bookings", room.id, start, bookings.len());

    let view = build_week(today, week, state.booking_service.lessons_per_day(), &bookings, &teachers);

    let mut ctx = page_context(Some(user), "timetable");
    ctx.insert("view", &view);
    ctx.insert("room", &room);
    render(state, "timetable.html", &ctx)
}
