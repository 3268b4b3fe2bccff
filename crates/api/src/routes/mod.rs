//! API route definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;

use crate::AppState;
use voltra_core::lifecycle::LifecycleError;

pub mod accounts;
pub mod cards;
pub mod health;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(accounts::routes()).merge(cards::routes())
}

/// Maps a lifecycle error to the JSON error response.
pub(crate) fn error_response(err: &LifecycleError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    }
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}

/// Builds a 400 response for request-level (syntactic) validation failures.
pub(crate) fn validation_error(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "VALIDATION_ERROR",
            "message": message,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status() {
        let response = error_response(&LifecycleError::AccountNotFound("a@x.com".into()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = error_response(&LifecycleError::NotCardOwner {
            owner: "b@x.com".into(),
        });
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = error_response(&LifecycleError::VersionConflict("Account a@x.com".into()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
