//! Configuration loading and management

mod io;
mod settings;

pub use settings::{Defaults, Endpoints, TeardownSettings};

use std::env;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Environment variable holding the management-API bearer token
pub const ARM_TOKEN_ENV: &str = "AZLAB_ARM_TOKEN";
/// Environment variable holding the directory-API bearer token
pub const GRAPH_TOKEN_ENV: &str = "AZLAB_GRAPH_TOKEN";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Subscription and tenant the tool operates on
    #[serde(default)]
    pub azure: AzureConfig,

    /// API base URLs (overridable for tests and sovereign clouds)
    #[serde(default)]
    pub endpoints: Endpoints,

    /// Fallback values for provisioning commands
    #[serde(default)]
    pub defaults: Defaults,

    /// Teardown polling behavior
    #[serde(default)]
    pub teardown: TeardownSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            azure: AzureConfig::default(),
            endpoints: Endpoints::default(),
            defaults: Defaults::default(),
            teardown: TeardownSettings::default(),
        }
    }
}

/// Subscription/tenant identity section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AzureConfig {
    #[serde(default)]
    pub subscription_id: String,
    #[serde(default)]
    pub tenant_id: String,
}

impl Config {
    /// The subscription to operate on, with the CLI override applied.
    ///
    /// Every management-API call needs this, so an empty value is a hard
    /// configuration error rather than something to limp past.
    pub fn subscription_id(&self, override_id: Option<&str>) -> Result<String> {
        if let Some(id) = override_id {
            return Ok(id.to_string());
        }
        if self.azure.subscription_id.is_empty() {
            bail!(
                "No subscription configured. Set azure.subscription_id in the config file \
                 or pass --subscription."
            );
        }
        Ok(self.azure.subscription_id.clone())
    }

    /// Read the management-API bearer token from the environment.
    pub fn arm_token(&self) -> Result<String> {
        env::var(ARM_TOKEN_ENV)
            .with_context(|| format!("{ARM_TOKEN_ENV} is not set (az account get-access-token)"))
    }

    /// Read the directory-API bearer token from the environment.
    pub fn graph_token(&self) -> Result<String> {
        env::var(GRAPH_TOKEN_ENV).with_context(|| {
            format!(
                "{GRAPH_TOKEN_ENV} is not set \
                 (az account get-access-token --resource-type ms-graph)"
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_parses_with_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.azure.subscription_id.is_empty());
        assert_eq!(config.endpoints.management, "https://management.azure.com");
        assert_eq!(config.teardown.poll_interval_secs, 10);
    }

    #[test]
    fn subscription_override_wins() {
        let config = Config::default();
        assert_eq!(config.subscription_id(Some("abc")).unwrap(), "abc");
    }

    #[test]
    fn missing_subscription_is_an_error() {
        let config = Config::default();
        assert!(config.subscription_id(None).is_err());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [azure]
            subscription_id = "0000"

            [defaults]
            location = "northeurope"
            "#,
        )
        .unwrap();
        assert_eq!(config.azure.subscription_id, "0000");
        assert_eq!(config.defaults.location, "northeurope");
        assert_eq!(config.defaults.vm_size, "Standard_B2s");
    }
}
