//! Caller identity. Authentication itself is an external capability — the
//! gateway in front of this service verifies the session and injects the
//! caller's id as a header. Here it only needs to parse, and every résumé
//! route refuses to run without it.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;

pub const CALLER_HEADER: &str = "x-caller-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(CALLER_HEADER)
            .ok_or(AppError::Unauthorized)?;
        let value = header.to_str().map_err(|_| AppError::Unauthorized)?;
        let id = Uuid::parse_str(value).map_err(|_| AppError::Unauthorized)?;
        Ok(CallerIdentity(id))
    }
}

/// The single ownership predicate applied before any record is returned or
/// mutated. A mismatch is reported exactly like a missing record so that
/// record existence never leaks across owners.
pub fn belongs_to(record: &ResumeRecord, caller: CallerIdentity) -> bool {
    record.owner_id == caller.0
}
