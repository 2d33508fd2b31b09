//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Gridmeet
//! API. It maps domain-specific errors to appropriate HTTP status codes and
//! JSON error responses.
//!
//! Server-side faults (storage errors, grid integrity errors) are logged
//! with their full detail and returned to the client as one generic,
//! non-descriptive message; internal error detail never leaks to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gridmeet_core::errors::GridError;
use serde_json::json;

/// Message returned for any server-side fault.
pub const GENERIC_ERR_MESSAGE: &str = "An unknown error has occurred.";

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain-specific `GridError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub GridError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            GridError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            GridError::Validation(_) | GridError::NameTaken => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            GridError::Authentication(_) => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            GridError::Authorization(_) => (StatusCode::FORBIDDEN, self.0.to_string()),
            GridError::GridDimension(detail) => {
                // Not user-caused through normal flows: the event's timeslot
                // rows have lost rectangularity.
                tracing::error!(error = %detail, "grid integrity fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERR_MESSAGE.to_string(),
                )
            }
            GridError::Database(report) => {
                tracing::error!(error = %report, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERR_MESSAGE.to_string(),
                )
            }
            GridError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

/// Automatic conversion from GridError to AppError.
///
/// This implementation allows using the `?` operator with functions that
/// return `Result<T, GridError>` in handler functions that return
/// `Result<T, AppError>`.
impl From<GridError> for AppError {
    fn from(err: GridError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError.
///
/// Repository functions return `eyre::Result`; this wraps their errors in
/// the `GridError::Database` variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(GridError::Database(err))
    }
}
