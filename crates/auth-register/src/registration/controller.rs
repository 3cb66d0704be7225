//! Create-or-update flow against the identity provider.

use super::{validate, OperationResult, RegistrationRequest, UpsertOutcome};
use crate::config::CognitoConfig;
use crate::error::RegistrationResult;
use identity_provider::IdentityProvider;
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Provisions or updates an account keyed by email.
///
/// The request's email is used as the pool username for create, update and
/// set-password calls alike.
#[derive(Clone)]
pub struct UpsertController {
    provider: Arc<dyn IdentityProvider>,
    config: CognitoConfig,
}

impl UpsertController {
    pub fn new(provider: Arc<dyn IdentityProvider>, config: CognitoConfig) -> Self {
        Self { provider, config }
    }

    /// Run the flow and fold any failure into a failed `OperationResult`.
    pub async fn upsert(&self, request: &RegistrationRequest) -> OperationResult {
        let result = self.try_upsert(request).await;

        if let Err(e) = &result {
            error!(email = %request.email, error = %e, "Registration failed");
        }

        result.into()
    }

    /// Validate, look up by email, then create or update and set the password permanent.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn try_upsert(
        &self,
        request: &RegistrationRequest,
    ) -> RegistrationResult<UpsertOutcome> {
        validate(request, &self.config)?;

        let pool_id = self.config.user_pool_id.as_str();
        let username = request.email.as_str();
        let password = request.password.expose_secret();
        let attributes = request.attributes();

        let existing = self
            .provider
            .list_users_by_email(pool_id, &request.email)
            .await?;
        debug!(matches = existing.len(), "Lookup complete");

        let outcome = if existing.is_empty() {
            info!(branch = "create", "No user found for email, creating");
            self.provider
                .create_user(pool_id, username, &attributes, password)
                .await?;
            UpsertOutcome::Created
        } else {
            info!(branch = "update", "User exists, updating attributes");
            self.provider
                .update_user_attributes(pool_id, username, &attributes)
                .await?;
            UpsertOutcome::Updated
        };

        self.provider
            .set_permanent_password(pool_id, username, password)
            .await?;

        info!(outcome = ?outcome, "Registration complete");
        Ok(outcome)
    }
}
