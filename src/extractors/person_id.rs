//! `person_id` path parameter.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Integer id from the `:person_id` path segment. A non-integer value is rejected
/// as `AppError::BadRequest`, so the client gets the usual JSON error body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for PersonId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        parse_person_id(&raw).map(PersonId)
    }
}

fn parse_person_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("person_id must be an integer: {}", raw)))
}
