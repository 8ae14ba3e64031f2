use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Json, Response},
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ApiError;

/// JSON body extractor and response wrapper.
///
/// Unlike `axum::Json` the body is decoded whatever its `Content-Type`, so
/// `curl -d` style clients work. Undecodable bodies become an [`ApiError`]
/// (400 with the usual `{"error": ...}` body), oversized ones a 413.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        let value = serde_json::from_slice(&bytes)?;
        Ok(ApiJson(value))
    }
}

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<T, ApiError>;
