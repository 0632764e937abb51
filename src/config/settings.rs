//! Configuration sections with their defaults

use serde::{Deserialize, Serialize};

/// API base URLs. The defaults are the public-cloud endpoints; integration
/// tests point both at a local mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_management_endpoint")]
    pub management: String,
    #[serde(default = "default_graph_endpoint")]
    pub graph: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            management: default_management_endpoint(),
            graph: default_graph_endpoint(),
        }
    }
}

fn default_management_endpoint() -> String {
    "https://management.azure.com".to_string()
}

fn default_graph_endpoint() -> String {
    "https://graph.microsoft.com".to_string()
}

/// Fallback values used when a provisioning command omits the flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_location")]
    pub location: String,
    /// Resource group used when --group is omitted
    #[serde(default)]
    pub resource_group: String,
    #[serde(default = "default_vm_size")]
    pub vm_size: String,
    #[serde(default = "default_vm_image")]
    pub vm_image: String,
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    #[serde(default = "default_storage_sku")]
    pub storage_sku: String,
    /// Directory domain for bulk-created users
    #[serde(default)]
    pub user_domain: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            location: default_location(),
            resource_group: String::new(),
            vm_size: default_vm_size(),
            vm_image: default_vm_image(),
            admin_username: default_admin_username(),
            storage_sku: default_storage_sku(),
            user_domain: String::new(),
        }
    }
}

fn default_location() -> String {
    "westeurope".to_string()
}

fn default_vm_size() -> String {
    "Standard_B2s".to_string()
}

fn default_vm_image() -> String {
    // publisher:offer:sku:version
    "Canonical:ubuntu-24_04-lts:server:latest".to_string()
}

fn default_admin_username() -> String {
    "labadmin".to_string()
}

fn default_storage_sku() -> String {
    "Standard_LRS".to_string()
}

/// Teardown polling behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeardownSettings {
    /// Seconds between polls of pending deletions
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Give up waiting after this many seconds (the deletions keep running
    /// server side)
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

impl Default for TeardownSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

fn default_poll_interval() -> u64 {
    10
}

fn default_poll_timeout() -> u64 {
    1800
}
