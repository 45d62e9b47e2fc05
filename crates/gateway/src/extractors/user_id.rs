//! User id path extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use common::AppError;

/// The `{id}` path segment parsed as a UUID.
///
/// Anything that is not a UUID is rejected with `400` before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;

        let id = Uuid::parse_str(&raw).map_err(|e| {
            tracing::error!("Error parsing ID: {}", e);
            AppError::bad_request("invalid ID format")
        })?;

        Ok(UserId(id))
    }
}
