//! API response types and HTTP mapping of registration results.

use crate::registration::{OperationResult, UpsertOutcome};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

impl OperationResult {
    /// 201 for a created user, 200 for an update, 500 for any failure.
    pub fn status_code(&self) -> StatusCode {
        match self.outcome {
            Some(UpsertOutcome::Created) => StatusCode::CREATED,
            Some(UpsertOutcome::Updated) => StatusCode::OK,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for OperationResult {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
