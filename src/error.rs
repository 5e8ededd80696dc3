use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::api::dtos::responses::WriteResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden")]
    Forbidden,
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Migration(e) => {
                error!("Migration error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Template(e) => {
                error!("Template error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Rejections of the `/ajax` write endpoints. These are answered with a
/// failed [`WriteResponse`], never with an error status.
#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("Please check you have filled in all the information")]
    MissingFields,
    #[error("Invalid {0}")]
    InvalidField(&'static str),
    #[error("Class size has to be between 1 and 100")]
    SizeOutOfRange,
    #[error("Room capacity has to be between 0 and 100")]
    CapacityOutOfRange,
    #[error("Invalid date")]
    InvalidDate,
    #[error("Can't book sessions that have already been")]
    DateInPast,
    #[error("Invalid room")]
    InvalidRoom,
    #[error("Invalid teacher")]
    InvalidTeacher,
    #[error("Class too big for room")]
    RoomTooSmall,
    #[error("A booking already exists there")]
    SlotTaken,
    #[error("{0} can be a maximum of 32 characters")]
    FieldTooLong(&'static str),
    #[error("A room under that name already exists")]
    DuplicateName,
    #[error("No {0} exists under that id")]
    NotFound(&'static str),
    #[error("Wrong username or password")]
    BadCredentials,
    #[error("An unknown error occurred ({0})")]
    UnknownPersistenceError(String),
}

impl FormError {
    /// Translates a repository failure. A uniqueness violation becomes
    /// `on_unique`; anything else is handled by [`FormError::unexpected`].
    pub fn from_persistence(err: AppError, on_unique: FormError, action: &str) -> Self {
        if let AppError::Database(e) = &err
            && e.as_database_error().is_some_and(|db_err| db_err.is_unique_violation()) {
            return on_unique;
        }
        Self::unexpected(err, action)
    }

    /// Logs the failure and reduces it to its code.
    pub fn unexpected(err: AppError, action: &str) -> Self {
        match err {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    let code = db_err.code().map(|c| c.into_owned()).unwrap_or_else(|| "DATABASE".to_string());
                    error!(code = %code, "Error occurred when {}: {}", action, db_err);
                    return FormError::UnknownPersistenceError(code);
                }
                let code = match &e {
                    sqlx::Error::PoolTimedOut => "POOL_TIMEOUT",
                    sqlx::Error::PoolClosed => "POOL_CLOSED",
                    sqlx::Error::Io(_) => "IO",
                    sqlx::Error::RowNotFound => "ROW_NOT_FOUND",
                    _ => "DATABASE",
                };
                error!(code = %code, "Error occurred when {}: {:?}", action, e);
                FormError::UnknownPersistenceError(code.to_string())
            }
            other => {
                error!("Error occurred when {}: {}", action, other);
                FormError::UnknownPersistenceError("INTERNAL".to_string())
            }
        }
    }
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(WriteResponse::failure(self.to_string()))).into_response()
    }
}
