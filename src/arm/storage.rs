//! Storage account operations.

use serde::Deserialize;

use super::{ApiError, ArmClient, encode_url_path_segment, send, send_json};
use crate::domain::{StorageAccount, Tags};

const API_VERSION: &str = "2023-01-01";

#[derive(Deserialize)]
struct StorageAccountWire {
    name: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    sku: SkuWire,
    #[serde(default)]
    kind: String,
    #[serde(default)]
    tags: Tags,
    #[serde(default)]
    properties: StorageProperties,
}

#[derive(Default, Deserialize)]
struct SkuWire {
    #[serde(default)]
    name: String,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorageProperties {
    #[serde(default)]
    access_tier: Option<String>,
    #[serde(default)]
    provisioning_state: String,
}

impl From<StorageAccountWire> for StorageAccount {
    fn from(wire: StorageAccountWire) -> Self {
        StorageAccount {
            name: wire.name,
            sku: wire.sku.name,
            kind: wire.kind,
            access_tier: wire.properties.access_tier,
            location: wire.location,
            tags: wire.tags,
        }
    }
}

impl ArmClient {
    /// Ask whether a storage account name is free. Names are global across
    /// the whole cloud, so a local syntax check is not enough.
    pub fn check_storage_name(&self, name: &str) -> Result<(bool, Option<String>), ApiError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct AvailabilityResponse {
            name_available: bool,
            #[serde(default)]
            message: Option<String>,
        }

        let request = self
            .request_sub("POST", "/providers/Microsoft.Storage/checkNameAvailability")
            .query("api-version", API_VERSION);

        let body = serde_json::json!({
            "name": name,
            "type": "Microsoft.Storage/storageAccounts",
        });

        let response: AvailabilityResponse = send_json(request, body)?.into_json()?;
        Ok((response.name_available, response.message))
    }

    /// Create a StorageV2 account. Returns the account snapshot when the
    /// API answers synchronously; `None` when creation was accepted and is
    /// still provisioning (poll with [`ArmClient::get_storage_account`]).
    pub fn create_storage_account(
        &self,
        group: &str,
        name: &str,
        location: &str,
        sku: &str,
        access_tier: Option<&str>,
        tags: &Tags,
    ) -> Result<Option<StorageAccount>, ApiError> {
        let request = self
            .request_sub(
                "PUT",
                &format!(
                    "/resourceGroups/{}/providers/Microsoft.Storage/storageAccounts/{}",
                    encode_url_path_segment(group),
                    encode_url_path_segment(name)
                ),
            )
            .query("api-version", API_VERSION);

        let mut properties = serde_json::json!({});
        if let Some(tier) = access_tier {
            properties["accessTier"] = serde_json::json!(tier);
        }

        let body = serde_json::json!({
            "location": location,
            "kind": "StorageV2",
            "sku": { "name": sku },
            "properties": properties,
            "tags": tags,
        });

        let response = send_json(request, body)?;
        if response.status() == 202 {
            return Ok(None);
        }
        let wire: StorageAccountWire = response.into_json()?;
        Ok(Some(wire.into()))
    }

    /// Fetch one storage account, with its provisioning state.
    pub fn get_storage_account(
        &self,
        group: &str,
        name: &str,
    ) -> Result<(StorageAccount, String), ApiError> {
        let request = self
            .request_sub(
                "GET",
                &format!(
                    "/resourceGroups/{}/providers/Microsoft.Storage/storageAccounts/{}",
                    encode_url_path_segment(group),
                    encode_url_path_segment(name)
                ),
            )
            .query("api-version", API_VERSION);

        let wire: StorageAccountWire = send(request)?.into_json()?;
        let state = wire.properties.provisioning_state.clone();
        Ok((wire.into(), state))
    }
}
