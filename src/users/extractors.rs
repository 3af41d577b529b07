use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ApiError;

/// JSON body decoded regardless of `Content-Type`. Any read or decode
/// failure is a 400.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            warn!(error = %e, "failed to read request body");
            ApiError::BadRequest
        })?;
        let value = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, "invalid json body");
            ApiError::BadRequest
        })?;
        Ok(JsonBody(value))
    }
}

/// The `{id}` path segment as a base-10 `i64`.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest)?;
        parse_id(&raw).map(UserId)
    }
}

pub(crate) fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|e| {
        warn!(id = %raw, error = %e, "invalid user id");
        ApiError::BadRequest
    })
}
