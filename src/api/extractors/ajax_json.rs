use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::FormError;

/// JSON body of an `/ajax` write. A body that is not a JSON object of the
/// expected shape is answered with a failed write response.
pub struct AjaxJson<T>(pub T);

impl<T, S> FromRequest<S> for AjaxJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = FormError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AjaxJson(value)),
            Err(rejection) => {
                debug!("Rejected write body: {}", rejection.body_text());
                Err(FormError::MissingFields)
            }
        }
    }
}
