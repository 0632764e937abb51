//! CLI command implementations

pub mod args;
pub mod audit;
pub mod container;
pub mod group;
pub mod init;
pub mod inventory;
pub mod rightsize;
pub mod role;
pub mod storage;
pub mod teardown;
pub mod users;
pub mod vm;

use anyhow::Result;

use azlab::arm::ArmClient;
use azlab::config::Config;
use azlab::graph::GraphClient;

/// Everything a command needs beyond its own arguments
pub struct CommandContext {
    pub config: Config,
    /// --subscription override
    pub subscription: Option<String>,
}

impl CommandContext {
    /// A management-API client for the effective subscription.
    pub fn arm(&self) -> Result<ArmClient> {
        ArmClient::from_config(&self.config, self.subscription.as_deref())
    }

    /// A directory-API client.
    pub fn graph(&self) -> Result<GraphClient> {
        GraphClient::from_config(&self.config)
    }

    /// The resource group to use: flag value, else the configured default.
    pub fn resource_group(&self, flag: Option<&str>) -> Result<String> {
        if let Some(group) = flag {
            return Ok(group.to_string());
        }
        if self.config.defaults.resource_group.is_empty() {
            anyhow::bail!(
                "No resource group given. Pass --group or set defaults.resource_group \
                 in the config file."
            );
        }
        Ok(self.config.defaults.resource_group.clone())
    }

    /// The region to use: flag value, else the configured default.
    pub fn location(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .unwrap_or_else(|| self.config.defaults.location.clone())
    }
}
