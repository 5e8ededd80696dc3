use axum::{extract::State, response::{IntoResponse, Redirect}, Json};
use crate::state::AppState;
use crate::api::extractors::ajax_json::AjaxJson;
use crate::error::{AppError, FormError};
use crate::api::dtos::{requests::LoginRequest, responses::WriteResponse};
use crate::domain::services::auth_service::{SESSION_COOKIE, SESSION_DAYS};
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::{info, warn};

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    AjaxJson(payload): AjaxJson<LoginRequest>,
) -> Result<Json<WriteResponse>, FormError> {
    let Some((user, pass)) = payload.credentials() else {
        return Err(FormError::BadCredentials);
    };
    let Some(login) = state.auth_service.verify_credentials(&user, &pass) else {
        warn!("Failed login attempt for {}", user);
        return Err(FormError::BadCredentials);
    };

    let (token, csrf_token) = state.auth_service.issue_session(login)
        .map_err(|e| FormError::unexpected(e, "issuing a session"))?;

    set_session_cookie(&cookies, &token, state.config.secure_cookies);

    info!("User logged in: {} (admin: {})", login.user, login.admin);
    Ok(Json(WriteResponse::ok().with_csrf(csrf_token)))
}

pub async fn logout(cookies: Cookies) -> Result<impl IntoResponse, AppError> {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").into());
    info!("User logged out");
    Ok(Redirect::to("/"))
}

fn set_session_cookie(cookies: &Cookies, token: &str, secure: bool) {
    let mut session = Cookie::new(SESSION_COOKIE, token.to_string());
    session.set_http_only(true);
    session.set_secure(secure);
    session.set_same_site(SameSite::Lax);
    session.set_path("/");
    session.set_max_age(Duration::days(SESSION_DAYS));
    cookies.add(session);
}
