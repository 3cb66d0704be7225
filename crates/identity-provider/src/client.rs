//! AWS Cognito user-pool client.

use crate::error::ProviderError;
use crate::provider::{email_filter, IdentityProvider};
use crate::types::{IdentityRecord, UserAttribute};
use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::{
    config::{retry::RetryConfig, BehaviorVersion, Region},
    error::DisplayErrorContext,
    types::{AttributeType, MessageActionType, UserType},
    Client,
};
use tracing::{debug, instrument, warn};

/// Cognito-backed identity provider.
///
/// The SDK client is cheap to clone and safe to share between requests.
/// Retries are disabled: every operation is attempted exactly once.
#[derive(Clone, Debug)]
pub struct CognitoIdentityProvider {
    client: Client,
}

impl CognitoIdentityProvider {
    /// Build a client from the default AWS credential chain.
    ///
    /// `region` falls back to the environment when `None`. `endpoint_url`
    /// points the client at a non-AWS endpoint such as a local emulator.
    pub async fn from_env(region: Option<&str>, endpoint_url: Option<&str>) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).retry_config(RetryConfig::disabled());

        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }

        let sdk_config = loader.load().await;
        Self::from_client(Client::new(&sdk_config))
    }

    /// Wrap an already configured SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    #[instrument(skip(self))]
    async fn list_users_by_email(
        &self,
        pool_id: &str,
        email: &str,
    ) -> Result<Vec<IdentityRecord>, ProviderError> {
        let output = self
            .client
            .list_users()
            .user_pool_id(pool_id)
            .filter(email_filter(email))
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                warn!(error = %message, "ListUsers failed");
                ProviderError::ListUsers(message)
            })?;

        let records: Vec<IdentityRecord> = output.users().iter().map(to_record).collect();
        debug!(count = records.len(), "ListUsers returned");
        Ok(records)
    }

    #[instrument(skip(self, attributes, temporary_password))]
    async fn create_user(
        &self,
        pool_id: &str,
        username: &str,
        attributes: &[UserAttribute],
        temporary_password: &str,
    ) -> Result<(), ProviderError> {
        self.client
            .admin_create_user()
            .user_pool_id(pool_id)
            .username(username)
            .set_user_attributes(Some(to_attribute_types(attributes)?))
            .temporary_password(temporary_password)
            .message_action(MessageActionType::Suppress)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                warn!(error = %message, "AdminCreateUser failed");
                ProviderError::CreateUser(message)
            })?;

        debug!("User created");
        Ok(())
    }

    #[instrument(skip(self, attributes))]
    async fn update_user_attributes(
        &self,
        pool_id: &str,
        username: &str,
        attributes: &[UserAttribute],
    ) -> Result<(), ProviderError> {
        self.client
            .admin_update_user_attributes()
            .user_pool_id(pool_id)
            .username(username)
            .set_user_attributes(Some(to_attribute_types(attributes)?))
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                warn!(error = %message, "AdminUpdateUserAttributes failed");
                ProviderError::UpdateAttributes(message)
            })?;

        debug!("User attributes updated");
        Ok(())
    }

    #[instrument(skip(self, password))]
    async fn set_permanent_password(
        &self,
        pool_id: &str,
        username: &str,
        password: &str,
    ) -> Result<(), ProviderError> {
        self.client
            .admin_set_user_password()
            .user_pool_id(pool_id)
            .username(username)
            .password(password)
            .permanent(true)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                warn!(error = %message, "AdminSetUserPassword failed");
                ProviderError::SetPassword(message)
            })?;

        debug!("Permanent password set");
        Ok(())
    }
}

fn to_record(user: &UserType) -> IdentityRecord {
    IdentityRecord {
        username: user.username().unwrap_or_default().to_string(),
        attributes: user
            .attributes()
            .iter()
            .map(|a| UserAttribute::new(a.name(), a.value().unwrap_or_default()))
            .collect(),
    }
}

fn to_attribute_types(attributes: &[UserAttribute]) -> Result<Vec<AttributeType>, ProviderError> {
    attributes
        .iter()
        .map(|a| {
            AttributeType::builder()
                .name(&a.name)
                .value(&a.value)
                .build()
                .map_err(|e| ProviderError::InvalidRequest(e.to_string()))
        })
        .collect()
}
