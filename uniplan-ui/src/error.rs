//! HTTP error mapping for uniplan-ui
//!
//! Wraps the common error taxonomy so handlers can use `?` and still
//! produce a JSON error body with a sensible status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uniplan_common::Error;

/// Handler-level error carrying a common [`Error`]
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            // Upstream reads and persists failed past our boundary
            Error::Fetch(_) | Error::Persist(_) => StatusCode::BAD_GATEWAY,
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
