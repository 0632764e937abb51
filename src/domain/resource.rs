//! Resource value objects returned by the management API.
//!
//! These are flat snapshots: fetched, displayed, optionally exported.
//! Nothing in here has a lifecycle of its own.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource tags. BTreeMap so table/CSV output is stable across runs.
pub type Tags = BTreeMap<String, String>;

/// A resource group snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceGroup {
    pub name: String,
    pub location: String,
    /// Succeeded, Deleting, ... as reported by the API
    pub provisioning_state: String,
    #[serde(default)]
    pub tags: Tags,
}

/// One row of the flat resource inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericResource {
    /// Full ARM resource ID
    pub id: String,
    pub name: String,
    /// Provider-qualified type, e.g. `Microsoft.Storage/storageAccounts`
    pub resource_type: String,
    pub resource_group: String,
    pub location: String,
    #[serde(default)]
    pub tags: Tags,
}

impl GenericResource {
    /// Extract the resource-group segment from a full ARM resource ID.
    ///
    /// Returns an empty string for IDs that are not under a resource group
    /// (subscription-level resources).
    pub fn group_from_id(id: &str) -> String {
        let mut segments = id.split('/').skip_while(|s| !s.eq_ignore_ascii_case("resourcegroups"));
        segments.next();
        segments.next().unwrap_or_default().to_string()
    }
}

/// A storage account snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageAccount {
    pub name: String,
    pub sku: String,
    pub kind: String,
    pub access_tier: Option<String>,
    pub location: String,
    #[serde(default)]
    pub tags: Tags,
}

/// A virtual machine snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualMachine {
    /// Full ARM resource ID (needed for the metrics endpoint)
    pub id: String,
    pub name: String,
    pub size: String,
    pub location: String,
    pub provisioning_state: String,
}

/// A container group snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerGroup {
    pub name: String,
    pub image: String,
    pub cpu: f64,
    pub memory_gb: f64,
    pub ip_address: Option<String>,
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_from_id_extracts_segment() {
        let id = "/subscriptions/0000/resourceGroups/lab-rg-1/providers/Microsoft.Compute/virtualMachines/vm1";
        assert_eq!(GenericResource::group_from_id(id), "lab-rg-1");
    }

    #[test]
    fn group_from_id_handles_subscription_level_ids() {
        let id = "/subscriptions/0000/providers/Microsoft.Authorization/roleDefinitions/abc";
        assert_eq!(GenericResource::group_from_id(id), "");
    }
}
