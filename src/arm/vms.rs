//! Virtual machine operations.

use anyhow::Result;
use serde::Deserialize;

use super::{ApiError, ArmClient, encode_url_path_segment, send, send_json};
use crate::domain::VirtualMachine;

const API_VERSION: &str = "2024-03-01";

#[derive(Deserialize)]
struct VmWire {
    id: String,
    name: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    properties: VmProperties,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VmProperties {
    #[serde(default)]
    hardware_profile: HardwareProfile,
    #[serde(default)]
    provisioning_state: String,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardwareProfile {
    #[serde(default)]
    vm_size: String,
}

impl From<VmWire> for VirtualMachine {
    fn from(wire: VmWire) -> Self {
        VirtualMachine {
            id: wire.id,
            name: wire.name,
            size: wire.properties.hardware_profile.vm_size,
            location: wire.location,
            provisioning_state: wire.properties.provisioning_state,
        }
    }
}

/// An image reference in `publisher:offer:sku:version` form
pub struct ImageReference {
    pub publisher: String,
    pub offer: String,
    pub sku: String,
    pub version: String,
}

impl ImageReference {
    pub fn parse(spec: &str) -> Result<Self> {
        let parts: Vec<&str> = spec.split(':').collect();
        let [publisher, offer, sku, version] = parts.as_slice() else {
            anyhow::bail!("Invalid image '{spec}', expected publisher:offer:sku:version");
        };
        Ok(Self {
            publisher: publisher.to_string(),
            offer: offer.to_string(),
            sku: sku.to_string(),
            version: version.to_string(),
        })
    }
}

impl ArmClient {
    /// Create a Linux VM attached to an existing NIC, with password auth
    /// (lab environments get logged into from anywhere).
    #[allow(clippy::too_many_arguments)]
    pub fn create_vm(
        &self,
        group: &str,
        name: &str,
        location: &str,
        size: &str,
        image: &ImageReference,
        admin_username: &str,
        admin_password: &str,
        nic_id: &str,
    ) -> Result<VirtualMachine, ApiError> {
        let request = self
            .request_sub(
                "PUT",
                &format!(
                    "/resourceGroups/{}/providers/Microsoft.Compute/virtualMachines/{}",
                    encode_url_path_segment(group),
                    encode_url_path_segment(name)
                ),
            )
            .query("api-version", API_VERSION);

        let body = serde_json::json!({
            "location": location,
            "properties": {
                "hardwareProfile": { "vmSize": size },
                "storageProfile": {
                    "imageReference": {
                        "publisher": image.publisher,
                        "offer": image.offer,
                        "sku": image.sku,
                        "version": image.version,
                    },
                    "osDisk": {
                        "createOption": "FromImage",
                        "managedDisk": { "storageAccountType": "StandardSSD_LRS" },
                    },
                },
                "osProfile": {
                    "computerName": name,
                    "adminUsername": admin_username,
                    "adminPassword": admin_password,
                    "linuxConfiguration": { "disablePasswordAuthentication": false },
                },
                "networkProfile": {
                    "networkInterfaces": [{ "id": nic_id }],
                },
            },
        });

        let wire: VmWire = send_json(request, body)?.into_json()?;
        Ok(wire.into())
    }

    /// List VMs in the subscription or one resource group.
    pub fn list_vms(&self, group: Option<&str>) -> Result<Vec<VirtualMachine>, ApiError> {
        #[derive(Deserialize)]
        struct ListResponse {
            value: Vec<VmWire>,
            #[serde(rename = "nextLink")]
            next_link: Option<String>,
        }

        let suffix = match group {
            Some(g) => format!(
                "/resourceGroups/{}/providers/Microsoft.Compute/virtualMachines",
                encode_url_path_segment(g)
            ),
            None => "/providers/Microsoft.Compute/virtualMachines".to_string(),
        };

        let mut vms = Vec::new();
        let mut page: ListResponse = send(
            self.request_sub("GET", &suffix)
                .query("api-version", API_VERSION),
        )?
        .into_json()?;

        loop {
            vms.extend(page.value.into_iter().map(VirtualMachine::from));
            match page.next_link {
                Some(url) => page = send(self.request_absolute("GET", &url))?.into_json()?,
                None => break,
            }
        }

        Ok(vms)
    }
}
