//! Resource group operations.

use serde::Deserialize;

use super::{ApiError, ArmClient, PendingDeletion, encode_url_path_segment, send, send_json};
use crate::domain::{ResourceGroup, Tags};

const API_VERSION: &str = "2021-04-01";

#[derive(Deserialize)]
struct ResourceGroupWire {
    name: String,
    location: String,
    #[serde(default)]
    tags: Tags,
    #[serde(default)]
    properties: ResourceGroupProperties,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceGroupProperties {
    #[serde(default)]
    provisioning_state: String,
}

impl From<ResourceGroupWire> for ResourceGroup {
    fn from(wire: ResourceGroupWire) -> Self {
        ResourceGroup {
            name: wire.name,
            location: wire.location,
            provisioning_state: wire.properties.provisioning_state,
            tags: wire.tags,
        }
    }
}

impl ArmClient {
    /// Create a resource group, or update its location/tags if it exists.
    /// The PUT is idempotent on the management side.
    pub fn create_resource_group(
        &self,
        name: &str,
        location: &str,
        tags: &Tags,
    ) -> Result<ResourceGroup, ApiError> {
        let request = self
            .request_sub("PUT", &format!("/resourcegroups/{}", encode_url_path_segment(name)))
            .query("api-version", API_VERSION);

        let body = serde_json::json!({
            "location": location,
            "tags": tags,
        });

        let wire: ResourceGroupWire = send_json(request, body)?.into_json()?;
        Ok(wire.into())
    }

    /// Fetch one resource group; `None` if it does not exist.
    pub fn get_resource_group(&self, name: &str) -> Result<Option<ResourceGroup>, ApiError> {
        let request = self
            .request_sub("GET", &format!("/resourcegroups/{}", encode_url_path_segment(name)))
            .query("api-version", API_VERSION);

        match send(request) {
            Ok(response) => {
                let wire: ResourceGroupWire = response.into_json()?;
                Ok(Some(wire.into()))
            }
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// List all resource groups in the subscription.
    pub fn list_resource_groups(&self) -> Result<Vec<ResourceGroup>, ApiError> {
        #[derive(Deserialize)]
        struct ListResponse {
            value: Vec<ResourceGroupWire>,
        }

        let request = self
            .request_sub("GET", "/resourcegroups")
            .query("api-version", API_VERSION);

        let response: ListResponse = send(request)?.into_json()?;
        Ok(response.value.into_iter().map(Into::into).collect())
    }

    /// Start deleting a resource group.
    ///
    /// Deletion is asynchronous: a `202 Accepted` carries a `Location` URL to
    /// poll. A `200` means the group was already gone by the time the call
    /// landed, in which case no polling handle is returned.
    pub fn delete_resource_group(&self, name: &str) -> Result<Option<PendingDeletion>, ApiError> {
        let request = self
            .request_sub(
                "DELETE",
                &format!("/resourcegroups/{}", encode_url_path_segment(name)),
            )
            .query("api-version", API_VERSION);

        let response = send(request)?;
        if response.status() == 202 {
            if let Some(poll_url) = response.header("Location") {
                return Ok(Some(PendingDeletion {
                    name: name.to_string(),
                    poll_url: poll_url.to_string(),
                }));
            }
        }
        Ok(None)
    }
}
