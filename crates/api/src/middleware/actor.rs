//! # Actor Resolution
//!
//! Authentication is an external collaborator: the surrounding deployment
//! resolves the caller (registered account or guest) and forwards its
//! opaque identifier in the `X-Actor-Id` header. This module extracts that
//! identity; the core treats it as an opaque comparable key and never
//! inspects it further.

use axum::{extract::FromRequestParts, http::request::Parts};
use gridmeet_core::errors::GridError;
use uuid::Uuid;

use crate::middleware::error_handling::AppError;

/// Opaque identity of the current caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor(pub Uuid);

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get("x-actor-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError(GridError::Authentication(
                    "Missing X-Actor-Id header".to_string(),
                ))
            })?;

        let id = Uuid::parse_str(value).map_err(|_| {
            AppError(GridError::Authentication(
                "Invalid X-Actor-Id header".to_string(),
            ))
        })?;

        Ok(Actor(id))
    }
}
