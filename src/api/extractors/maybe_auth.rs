use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::domain::models::auth::SessionUser;
use crate::domain::services::auth_service::SESSION_COOKIE;
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::debug;

pub struct MaybeAuthUser(pub Option<SessionUser>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let Some(cookies) = parts.extensions.get::<Cookies>() else {
            return Ok(MaybeAuthUser(None));
        };

        let Some(cookie) = cookies.get(SESSION_COOKIE) else {
            return Ok(MaybeAuthUser(None));
        };

        match app_state.auth_service.decode_session(cookie.value()) {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            Err(_) => {
                // Expired or forged session -> treat as guest
                debug!("MaybeAuth: discarding invalid session cookie");
                Ok(MaybeAuthUser(None))
            }
        }
    }
}
