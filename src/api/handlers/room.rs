use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::ajax_json::AjaxJson;
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::api::dtos::requests::{id_text, AddRoomRequest, RemoveRoomRequest};
use crate::api::dtos::responses::WriteResponse;
use crate::api::views::{page_context, render};
use crate::domain::models::room::RoomForm;
use crate::error::{AppError, FormError};
use std::sync::Arc;

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let rooms = state.room_repo.list_by_name().await?;
    let mut ctx = page_context(Some(&user), "rooms");
    ctx.insert("rooms", &rooms);
    render(&state, "rooms.html", &ctx)
}

pub async fn add_room_page(
    State(state): State<Arc<AppState>>,
    AdminUser(user): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    render(&state, "add_room.html", &page_context(Some(&user), "rooms"))
}

pub async fn remove_room_page(
    State(state): State<Arc<AppState>>,
    AdminUser(user): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let rooms = state.room_repo.list_by_name().await?;
    let mut ctx = page_context(Some(&user), "rooms");
    ctx.insert("rooms", &rooms);
    render(&state, "remove_room.html", &ctx)
}

pub async fn add_room(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    AjaxJson(payload): AjaxJson<AddRoomRequest>,
) -> Result<Json<WriteResponse>, FormError> {
    let form: RoomForm = payload.into();
    let room = state.roster_service.add_room(&form).await?;
    let mut response = WriteResponse::ok();
    response.room_id = Some(room.id);
    Ok(Json(response))
}

pub async fn remove_room(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    AjaxJson(payload): AjaxJson<RemoveRoomRequest>,
) -> Result<Json<WriteResponse>, FormError> {
    state.roster_service.remove_room(&id_text(payload.room)).await?;
    Ok(Json(WriteResponse::ok()))
}
