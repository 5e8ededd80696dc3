use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::ajax_json::AjaxJson;
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::api::dtos::requests::{id_text, RemoveTeacherRequest, TeacherRequest};
use crate::api::dtos::responses::WriteResponse;
use crate::api::views::{page_context, render};
use crate::domain::models::teacher::TeacherForm;
use crate::error::{AppError, FormError};
use std::sync::Arc;

pub async fn list_teachers(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let teachers = state.teacher_repo.list_by_last_name().await?;
    let mut ctx = page_context(Some(&user), "teachers");
    ctx.insert("teachers", &teachers);
    render(&state, "teachers.html", &ctx)
}

pub async fn add_teacher_page(
    State(state): State<Arc<AppState>>,
    AdminUser(user): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    render(&state, "add_teacher.html", &page_context(Some(&user), "teachers"))
}

pub async fn remove_teacher_page(
    State(state): State<Arc<AppState>>,
    AdminUser(user): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let teachers = state.teacher_repo.list_by_last_name().await?;
    let mut ctx = page_context(Some(&user), "teachers");
    ctx.insert("teachers", &teachers);
    render(&state, "remove_teacher.html", &ctx)
}

pub async fn edit_teacher_page(
    State(state): State<Arc<AppState>>,
    AdminUser(user): AdminUser,
    Path(teacher_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let teacher = state.teacher_repo.find_by_id(teacher_id).await?
        .ok_or(AppError::NotFound("Teacher not found".into()))?;
    let mut ctx = page_context(Some(&user), "teachers");
    ctx.insert("teacher", &teacher);
    render(&state, "edit_teacher.html", &ctx)
}

pub async fn add_teacher(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    AjaxJson(payload): AjaxJson<TeacherRequest>,
) -> Result<Json<WriteResponse>, FormError> {
    let form: TeacherForm = payload.into();
    state.roster_service.add_teacher(&form).await?;
    Ok(Json(WriteResponse::ok()))
}

pub async fn remove_teacher(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    AjaxJson(payload): AjaxJson<RemoveTeacherRequest>,
) -> Result<Json<WriteResponse>, FormError> {
    state.roster_service.remove_teacher(&id_text(payload.teacher)).await?;
    Ok(Json(WriteResponse::ok()))
}

pub async fn edit_teacher(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    AjaxJson(payload): AjaxJson<TeacherRequest>,
) -> Result<Json<WriteResponse>, FormError> {
    let form: TeacherForm = payload.into();
    state.roster_service.edit_teacher(&form).await?;
    Ok(Json(WriteResponse::ok()))
}
