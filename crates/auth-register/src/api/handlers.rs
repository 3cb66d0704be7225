//! HTTP request handlers.

use super::types::HealthResponse;
use super::AppState;
use crate::error::RegistrationError;
use crate::registration::{OperationResult, RegistrationRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info, warn};

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Create or update a user account.
///
/// Always answers with an `OperationResult` body, including when the
/// request body cannot be decoded.
pub async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> OperationResult {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Undecodable registration payload");
            return OperationResult::failure(&RegistrationError::InvalidPayload(
                rejection.body_text(),
            ));
        }
    };

    info!(email = %request.email, "Registration request received");
    state.controller.upsert(&request).await
}
