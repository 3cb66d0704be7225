//! User registration service.
//!
//! Creates or updates an identity-provider account for an email address:
//! - Validates the payload and the identity-pool configuration
//! - Looks the user up by email and creates or updates it
//! - Sets the submitted password as permanent

pub mod api;
pub mod config;
pub mod error;
pub mod registration;

pub use config::Config;
pub use error::RegistrationError;
pub use registration::{OperationResult, RegistrationRequest, UpsertController, UpsertOutcome};
