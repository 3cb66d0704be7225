//! Registration request handling: validation and the create-or-update flow.

mod controller;
mod validator;

pub use controller::UpsertController;
pub use validator::{is_valid_phone_number, validate};

use crate::error::RegistrationError;
use identity_provider::{UserAttribute, ATTR_EMAIL, ATTR_NAME, ATTR_PHONE_NUMBER};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for every failure message returned to the caller.
pub const FAILURE_PREFIX: &str = "Erro ao processar o usuário: ";

pub const CREATED_MESSAGE: &str = "Usuário criado com sucesso!";
pub const UPDATED_MESSAGE: &str = "Usuário atualizado com sucesso!";

/// Incoming registration payload.
///
/// Missing required fields decode as blank strings so the validator can
/// reject them with a descriptive message.
#[derive(Debug, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default = "empty_secret")]
    pub password: SecretString,

    #[serde(default)]
    pub phone: Option<String>,
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

impl RegistrationRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        phone: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: SecretString::new(password.into()),
            phone: phone.map(str::to_string),
        }
    }

    /// Phone number if one was supplied and is not blank.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// Attributes submitted to the identity provider.
    pub fn attributes(&self) -> Vec<UserAttribute> {
        let mut attributes = vec![
            UserAttribute::new(ATTR_NAME, &self.name),
            UserAttribute::new(ATTR_EMAIL, &self.email),
        ];

        if let Some(phone) = self.phone() {
            attributes.push(UserAttribute::new(ATTR_PHONE_NUMBER, phone));
        }

        attributes
    }
}

impl fmt::Display for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {} | Email: {} | Password: *** | Phone {}",
            self.name,
            self.email,
            self.phone.as_deref().unwrap_or_default()
        )
    }
}

/// Which branch a successful upsert took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl UpsertOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            UpsertOutcome::Created => CREATED_MESSAGE,
            UpsertOutcome::Updated => UPDATED_MESSAGE,
        }
    }
}

/// Result returned to the caller for every invocation.
///
/// Only `success` and `message` are serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,

    #[serde(skip)]
    pub outcome: Option<UpsertOutcome>,
}

impl OperationResult {
    pub fn failure(error: &RegistrationError) -> Self {
        Self {
            success: false,
            message: format!("{}{}", FAILURE_PREFIX, error),
            outcome: None,
        }
    }
}

impl From<UpsertOutcome> for OperationResult {
    fn from(outcome: UpsertOutcome) -> Self {
        Self {
            success: true,
            message: outcome.message().to_string(),
            outcome: Some(outcome),
        }
    }
}

impl From<Result<UpsertOutcome, RegistrationError>> for OperationResult {
    fn from(result: Result<UpsertOutcome, RegistrationError>) -> Self {
        match result {
            Ok(outcome) => outcome.into(),
            Err(e) => Self::failure(&e),
        }
    }
}
