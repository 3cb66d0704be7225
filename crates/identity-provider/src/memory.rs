//! In-process identity provider for local development and tests.

use crate::error::ProviderError;
use crate::provider::IdentityProvider;
use crate::types::{IdentityRecord, UserAttribute, ATTR_EMAIL};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// A user held by [`InMemoryIdentityProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub username: String,
    pub attributes: Vec<UserAttribute>,
    pub password: String,
    /// False until `set_permanent_password` runs
    pub password_permanent: bool,
}

impl StoredUser {
    fn to_record(&self) -> IdentityRecord {
        IdentityRecord {
            username: self.username.clone(),
            attributes: self.attributes.clone(),
        }
    }

    fn has_email(&self, email: &str) -> bool {
        self.attributes
            .iter()
            .any(|a| a.name == ATTR_EMAIL && a.value == email)
    }
}

/// Users keyed by (pool id, username).
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    users: RwLock<HashMap<(String, String), StoredUser>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored user.
    pub async fn user(&self, pool_id: &str, username: &str) -> Option<StoredUser> {
        self.users
            .read()
            .await
            .get(&key(pool_id, username))
            .cloned()
    }

    /// Number of stored users across all pools.
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

fn key(pool_id: &str, username: &str) -> (String, String) {
    (pool_id.to_string(), username.to_string())
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn list_users_by_email(
        &self,
        pool_id: &str,
        email: &str,
    ) -> Result<Vec<IdentityRecord>, ProviderError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|((pool, _), user)| pool == pool_id && user.has_email(email))
            .map(|(_, user)| user.to_record())
            .collect())
    }

    async fn create_user(
        &self,
        pool_id: &str,
        username: &str,
        attributes: &[UserAttribute],
        temporary_password: &str,
    ) -> Result<(), ProviderError> {
        let mut users = self.users.write().await;
        let key = key(pool_id, username);

        if users.contains_key(&key) {
            return Err(ProviderError::CreateUser(
                "UsernameExistsException: User account already exists".into(),
            ));
        }

        users.insert(
            key,
            StoredUser {
                username: username.to_string(),
                attributes: attributes.to_vec(),
                password: temporary_password.to_string(),
                password_permanent: false,
            },
        );

        debug!(username = %username, "Stored new user");
        Ok(())
    }

    async fn update_user_attributes(
        &self,
        pool_id: &str,
        username: &str,
        attributes: &[UserAttribute],
    ) -> Result<(), ProviderError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&key(pool_id, username)).ok_or_else(|| {
            ProviderError::UpdateAttributes("UserNotFoundException: User does not exist.".into())
        })?;

        for attribute in attributes {
            match user.attributes.iter_mut().find(|a| a.name == attribute.name) {
                Some(existing) => existing.value = attribute.value.clone(),
                None => user.attributes.push(attribute.clone()),
            }
        }

        Ok(())
    }

    async fn set_permanent_password(
        &self,
        pool_id: &str,
        username: &str,
        password: &str,
    ) -> Result<(), ProviderError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&key(pool_id, username)).ok_or_else(|| {
            ProviderError::SetPassword("UserNotFoundException: User does not exist.".into())
        })?;

        user.password = password.to_string();
        user.password_permanent = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ATTR_NAME, ATTR_PHONE_NUMBER};

    const POOL: &str = "pool";

    fn attributes(name: &str) -> Vec<UserAttribute> {
        vec![
            UserAttribute::new(ATTR_NAME, name),
            UserAttribute::new(ATTR_EMAIL, "maria@example.com"),
        ]
    }

    #[tokio::test]
    async fn test_create_then_lookup() {
        let provider = InMemoryIdentityProvider::new();
        provider
            .create_user(POOL, "maria@example.com", &attributes("Maria"), "temp")
            .await
            .unwrap();

        let found = provider
            .list_users_by_email(POOL, "maria@example.com")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let other_pool = provider
            .list_users_by_email("other", "maria@example.com")
            .await
            .unwrap();
        assert!(other_pool.is_empty());

        let user = provider.user(POOL, "maria@example.com").await.unwrap();
        assert!(!user.password_permanent);
    }

    #[tokio::test]
    async fn test_duplicate_create_fails() {
        let provider = InMemoryIdentityProvider::new();
        provider
            .create_user(POOL, "maria@example.com", &attributes("Maria"), "temp")
            .await
            .unwrap();

        let result = provider
            .create_user(POOL, "maria@example.com", &attributes("Maria"), "temp")
            .await;
        assert!(matches!(result, Err(ProviderError::CreateUser(_))));
    }

    #[tokio::test]
    async fn test_update_overwrites_and_adds() {
        let provider = InMemoryIdentityProvider::new();
        provider
            .create_user(POOL, "maria@example.com", &attributes("Maria"), "temp")
            .await
            .unwrap();

        let mut updated = attributes("Maria Silva");
        updated.push(UserAttribute::new(ATTR_PHONE_NUMBER, "+5511912345678"));
        provider
            .update_user_attributes(POOL, "maria@example.com", &updated)
            .await
            .unwrap();

        let record = provider.user(POOL, "maria@example.com").await.unwrap();
        assert_eq!(record.attributes.len(), 3);
        assert!(record
            .attributes
            .contains(&UserAttribute::new(ATTR_NAME, "Maria Silva")));
    }

    #[tokio::test]
    async fn test_unknown_user_operations_fail() {
        let provider = InMemoryIdentityProvider::new();

        let update = provider
            .update_user_attributes(POOL, "ghost@example.com", &[])
            .await;
        assert!(matches!(update, Err(ProviderError::UpdateAttributes(_))));

        let password = provider
            .set_permanent_password(POOL, "ghost@example.com", "pw")
            .await;
        assert!(matches!(password, Err(ProviderError::SetPassword(_))));
    }

    #[tokio::test]
    async fn test_set_permanent_password() {
        let provider = InMemoryIdentityProvider::new();
        provider
            .create_user(POOL, "maria@example.com", &attributes("Maria"), "temp")
            .await
            .unwrap();
        provider
            .set_permanent_password(POOL, "maria@example.com", "final")
            .await
            .unwrap();

        let user = provider.user(POOL, "maria@example.com").await.unwrap();
        assert_eq!(user.password, "final");
        assert!(user.password_permanent);
    }
}
