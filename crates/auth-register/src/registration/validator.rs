//! Payload and configuration validation.

use super::RegistrationRequest;
use crate::config::CognitoConfig;
use crate::error::{RegistrationError, RegistrationResult};
use secrecy::ExposeSecret;

/// Maximum number of digits after the leading `+`.
const MAX_PHONE_DIGITS: usize = 15;

/// Validate configuration and payload, stopping at the first violation.
///
/// Order: configuration readiness, required fields, phone format.
pub fn validate(request: &RegistrationRequest, config: &CognitoConfig) -> RegistrationResult<()> {
    config.ensure_ready()?;

    let required = [
        request.name.as_str(),
        request.email.as_str(),
        request.password.expose_secret().as_str(),
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(RegistrationError::InvalidPayload(request.to_string()));
    }

    if let Some(phone) = request.phone() {
        if !is_valid_phone_number(phone) {
            return Err(RegistrationError::InvalidPhoneFormat(phone.to_string()));
        }
    }

    Ok(())
}

/// `+` followed by 1 to 15 ASCII digits, nothing else.
pub fn is_valid_phone_number(phone: &str) -> bool {
    match phone.strip_prefix('+') {
        Some(digits) => {
            !digits.is_empty()
                && digits.len() <= MAX_PHONE_DIGITS
                && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
