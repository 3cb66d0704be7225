//! Configuration for the registration service.

use crate::error::{RegistrationError, RegistrationResult};
use anyhow::{Context, Result};
use serde::Deserialize;

/// Service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Cognito user pool configuration
    #[serde(default)]
    pub cognito: CognitoConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CognitoConfig {
    /// User pool identifier (COGNITO__USER_POOL_ID)
    #[serde(default)]
    pub user_pool_id: String,

    /// App client identifier (COGNITO__CLIENT_ID)
    #[serde(default)]
    pub client_id: String,

    /// AWS region; the default provider chain is used when unset
    pub region: Option<String>,

    /// Endpoint override, e.g. a local Cognito emulator
    pub endpoint_url: Option<String>,

    /// Keep users in process memory instead of calling Cognito (local development)
    #[serde(default)]
    pub in_memory: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl CognitoConfig {
    pub fn new(user_pool_id: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            user_pool_id: user_pool_id.into(),
            client_id: client_id.into(),
            region: None,
            endpoint_url: None,
            in_memory: false,
        }
    }

    /// Check that both identifiers are non-blank.
    pub fn ensure_ready(&self) -> RegistrationResult<()> {
        if self.client_id.trim().is_empty() {
            return Err(RegistrationError::ConfigurationMissing(
                "COGNITO__CLIENT_ID not set".into(),
            ));
        }

        if self.user_pool_id.trim().is_empty() {
            return Err(RegistrationError::ConfigurationMissing(
                "COGNITO__USER_POOL_ID not set".into(),
            ));
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_source(config::Environment::default())
    }

    fn from_source(source: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(source.separator("__").try_parsing(false))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
