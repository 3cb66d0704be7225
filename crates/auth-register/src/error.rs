//! Error types for the registration service.

use identity_provider::ProviderError;
use thiserror::Error;

/// Failures that end a registration attempt.
///
/// Every variant is turned into a failed `OperationResult` at the controller
/// boundary; none of them reach the transport layer as a fault.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid phone number format: {0}")]
    InvalidPhoneFormat(String),

    #[error("Identity provider error: {0}")]
    Provider(#[from] ProviderError),
}

pub type RegistrationResult<T> = Result<T, RegistrationError>;
