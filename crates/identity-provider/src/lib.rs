//! Identity provider client used for user provisioning.

mod client;
mod error;
mod memory;
mod provider;
mod types;

pub use client::CognitoIdentityProvider;
pub use error::ProviderError;
pub use memory::{InMemoryIdentityProvider, StoredUser};
pub use provider::{email_filter, IdentityProvider};
pub use types::*;
