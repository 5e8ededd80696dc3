use axum::{
    extract::{FromRequestParts, FromRef},
    http::{request::Parts, Method},
};
use crate::state::AppState;
use crate::domain::models::auth::SessionUser;
use crate::domain::services::auth_service::SESSION_COOKIE;
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::{debug, Span};

pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Any logged-in user. State-changing requests must echo the session's CSRF
/// token in the `X-CSRF-Token` header.
pub struct AuthUser(pub SessionUser);

/// A logged-in administrator.
pub struct AdminUser(pub SessionUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or(AppError::Internal)?;

        let token = cookies.get(SESSION_COOKIE)
            .ok_or(AppError::Forbidden)?
            .value()
            .to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let user = app_state.auth_service.decode_session(&token)
            .map_err(|_| AppError::Forbidden)?;

        let method = &parts.method;
        if method != Method::GET && method != Method::HEAD && method != Method::OPTIONS {
            let csrf_header_val = parts.headers.get(CSRF_HEADER)
                .ok_or(AppError::Forbidden)?
                .to_str()
                .map_err(|_| AppError::Forbidden)?;

            if csrf_header_val != user.csrf_token {
                debug!("CSRF token mismatch for {}", user.name);
                return Err(AppError::Forbidden);
            }
        }

        Span::current().record("user", user.name.as_str());

        Ok(AuthUser(user))
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.admin {
            debug!("Admin access denied for {}", user.name);
            return Err(AppError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}
