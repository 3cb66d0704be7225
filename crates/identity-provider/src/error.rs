//! Identity provider errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("ListUsers failed: {0}")]
    ListUsers(String),

    #[error("AdminCreateUser failed: {0}")]
    CreateUser(String),

    #[error("AdminUpdateUserAttributes failed: {0}")]
    UpdateAttributes(String),

    #[error("AdminSetUserPassword failed: {0}")]
    SetPassword(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
