//! Generic resource listing for the inventory report.

use serde::Deserialize;

use super::{ApiError, ArmClient, encode_url_path_segment, send};
use crate::domain::{GenericResource, Tags};

const API_VERSION: &str = "2021-04-01";

#[derive(Deserialize)]
struct ResourceWire {
    id: String,
    name: String,
    #[serde(rename = "type")]
    resource_type: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    tags: Tags,
}

#[derive(Deserialize)]
struct ListResponse {
    value: Vec<ResourceWire>,
    #[serde(rename = "nextLink")]
    next_link: Option<String>,
}

impl ArmClient {
    /// List resources across the subscription, or within one resource group.
    /// Follows `nextLink` paging until the listing is exhausted.
    pub fn list_resources(&self, group: Option<&str>) -> Result<Vec<GenericResource>, ApiError> {
        let suffix = match group {
            Some(g) => format!("/resourceGroups/{}/resources", encode_url_path_segment(g)),
            None => "/resources".to_string(),
        };

        let mut resources = Vec::new();
        let mut page: ListResponse = send(
            self.request_sub("GET", &suffix)
                .query("api-version", API_VERSION),
        )?
        .into_json()?;

        loop {
            for wire in page.value {
                resources.push(GenericResource {
                    resource_group: GenericResource::group_from_id(&wire.id),
                    id: wire.id,
                    name: wire.name,
                    resource_type: wire.resource_type,
                    location: wire.location,
                    tags: wire.tags,
                });
            }
            match page.next_link {
                Some(url) => page = send(self.request_absolute("GET", &url))?.into_json()?,
                None => break,
            }
        }

        Ok(resources)
    }
}
