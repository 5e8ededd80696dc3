use axum::{extract::State, response::{IntoResponse, Redirect, Response}};
use crate::state::AppState;
use crate::api::extractors::{auth::AuthUser, maybe_auth::MaybeAuthUser};
use crate::api::views::{page_context, render};
use crate::error::AppError;
use std::sync::Arc;

/// Login page for guests; logged-in users go straight to the rooms list.
pub async fn index(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> Result<Response, AppError> {
    if user.is_some() {
        return Ok(Redirect::to("/rooms").into_response());
    }
    Ok(render(&state, "index.html", &page_context(None, "login"))?.into_response())
}

pub async fn about(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let mut ctx = page_context(Some(&user), "about");
    ctx.insert("version", env!("CARGO_PKG_VERSION"));
    ctx.insert("lessons_per_day", &state.config.lessons_per_day);
    ctx.insert("timezone", state.config.timezone.name());
    render(&state, "about.html", &ctx)
}
