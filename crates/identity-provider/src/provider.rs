//! The identity provider seam used by the registration service.

use crate::error::ProviderError;
use crate::types::{IdentityRecord, UserAttribute};
use async_trait::async_trait;

/// Operations the registration flow needs from an identity provider.
///
/// Implementations are shared across concurrent requests and must not keep
/// per-call mutable state.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// List users in the pool whose `email` attribute equals `email`.
    async fn list_users_by_email(
        &self,
        pool_id: &str,
        email: &str,
    ) -> Result<Vec<IdentityRecord>, ProviderError>;

    /// Create a user with a temporary password. No welcome message is sent.
    async fn create_user(
        &self,
        pool_id: &str,
        username: &str,
        attributes: &[UserAttribute],
        temporary_password: &str,
    ) -> Result<(), ProviderError>;

    /// Overwrite attributes on an existing user.
    async fn update_user_attributes(
        &self,
        pool_id: &str,
        username: &str,
        attributes: &[UserAttribute],
    ) -> Result<(), ProviderError>;

    /// Set the user's password and mark it permanent.
    async fn set_permanent_password(
        &self,
        pool_id: &str,
        username: &str,
        password: &str,
    ) -> Result<(), ProviderError>;
}

/// Build the lookup filter expression for an exact email match.
///
/// Backslashes and double quotes inside the value are escaped with a backslash.
pub fn email_filter(email: &str) -> String {
    let escaped = email.replace('\\', "\\\\").replace('"', "\\\"");
    format!("email = \"{}\"", escaped)
}
