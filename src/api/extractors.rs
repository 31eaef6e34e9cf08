use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::error::ValidationReason;

/// JSON body extractor that reports malformed payloads in the API error shape
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            ApiError::bad_request(
                ValidationReason::InvalidBody,
                format!("Failed to parse JSON: {}", e.body_text()),
            )
        })?;

        Ok(JsonBody(value))
    }
}
