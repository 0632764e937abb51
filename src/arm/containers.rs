//! Container instance operations.

use serde::Deserialize;

use super::{ApiError, ArmClient, encode_url_path_segment, send_json};
use crate::domain::ContainerGroup;

const API_VERSION: &str = "2023-05-01";

impl ArmClient {
    /// Create a container group running a single public container.
    #[allow(clippy::too_many_arguments)]
    pub fn create_container_group(
        &self,
        group: &str,
        name: &str,
        location: &str,
        image: &str,
        cpu: f64,
        memory_gb: f64,
        port: u16,
    ) -> Result<ContainerGroup, ApiError> {
        #[derive(Deserialize)]
        struct ContainerGroupWire {
            name: String,
            #[serde(default)]
            properties: GroupProperties,
        }

        #[derive(Default, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct GroupProperties {
            #[serde(default)]
            containers: Vec<ContainerWire>,
            #[serde(default)]
            ip_address: Option<IpAddressWire>,
            #[serde(default)]
            provisioning_state: String,
        }

        #[derive(Deserialize)]
        struct ContainerWire {
            #[serde(default)]
            properties: ContainerProperties,
        }

        #[derive(Default, Deserialize)]
        struct ContainerProperties {
            #[serde(default)]
            image: String,
        }

        #[derive(Deserialize)]
        struct IpAddressWire {
            #[serde(default)]
            ip: Option<String>,
        }

        let request = self
            .request_sub(
                "PUT",
                &format!(
                    "/resourceGroups/{}/providers/Microsoft.ContainerInstance/containerGroups/{}",
                    encode_url_path_segment(group),
                    encode_url_path_segment(name)
                ),
            )
            .query("api-version", API_VERSION);

        let body = serde_json::json!({
            "location": location,
            "properties": {
                "osType": "Linux",
                "restartPolicy": "Always",
                "containers": [{
                    "name": name,
                    "properties": {
                        "image": image,
                        "ports": [{ "port": port, "protocol": "TCP" }],
                        "resources": {
                            "requests": { "cpu": cpu, "memoryInGB": memory_gb },
                        },
                    },
                }],
                "ipAddress": {
                    "type": "Public",
                    "ports": [{ "port": port, "protocol": "TCP" }],
                },
            },
        });

        let wire: ContainerGroupWire = send_json(request, body)?.into_json()?;
        Ok(ContainerGroup {
            name: wire.name,
            image: wire
                .properties
                .containers
                .first()
                .map(|c| c.properties.image.clone())
                .unwrap_or_else(|| image.to_string()),
            cpu,
            memory_gb,
            ip_address: wire.properties.ip_address.and_then(|ip| ip.ip),
            state: wire.properties.provisioning_state,
        })
    }
}
