//! Minimal network plumbing for VM provisioning: one vnet + subnet per
//! resource group, one NSG with an SSH allow rule, one public IP and NIC
//! per VM.

use serde::Deserialize;

use super::{ApiError, ArmClient, encode_url_path_segment, send_json};

const API_VERSION: &str = "2023-04-01";

#[derive(Deserialize)]
struct IdResponse {
    id: String,
}

impl ArmClient {
    fn network_path(&self, group: &str, kind: &str, name: &str) -> String {
        format!(
            "/resourceGroups/{}/providers/Microsoft.Network/{}/{}",
            encode_url_path_segment(group),
            kind,
            encode_url_path_segment(name)
        )
    }

    /// Create (or re-apply) the shared lab vnet for a resource group.
    /// Returns the subnet ID the NICs attach to.
    pub fn ensure_virtual_network(
        &self,
        group: &str,
        vnet_name: &str,
        location: &str,
    ) -> Result<String, ApiError> {
        let request = self
            .request_sub("PUT", &self.network_path(group, "virtualNetworks", vnet_name))
            .query("api-version", API_VERSION);

        let body = serde_json::json!({
            "location": location,
            "properties": {
                "addressSpace": { "addressPrefixes": ["10.10.0.0/16"] },
                "subnets": [{
                    "name": "default",
                    "properties": { "addressPrefix": "10.10.1.0/24" },
                }],
            },
        });

        let response: IdResponse = send_json(request, body)?.into_json()?;
        Ok(format!("{}/subnets/default", response.id))
    }

    /// Create (or re-apply) the lab NSG: allow inbound SSH, defaults for the
    /// rest. Returns the NSG ID.
    pub fn ensure_network_security_group(
        &self,
        group: &str,
        nsg_name: &str,
        location: &str,
    ) -> Result<String, ApiError> {
        let request = self
            .request_sub(
                "PUT",
                &self.network_path(group, "networkSecurityGroups", nsg_name),
            )
            .query("api-version", API_VERSION);

        let body = serde_json::json!({
            "location": location,
            "properties": {
                "securityRules": [{
                    "name": "allow-ssh",
                    "properties": {
                        "priority": 1000,
                        "direction": "Inbound",
                        "access": "Allow",
                        "protocol": "Tcp",
                        "sourceAddressPrefix": "*",
                        "sourcePortRange": "*",
                        "destinationAddressPrefix": "*",
                        "destinationPortRange": "22",
                    },
                }],
            },
        });

        let response: IdResponse = send_json(request, body)?.into_json()?;
        Ok(response.id)
    }

    /// Create a public IP for one VM. Returns its ID.
    pub fn create_public_ip(
        &self,
        group: &str,
        pip_name: &str,
        location: &str,
    ) -> Result<String, ApiError> {
        let request = self
            .request_sub("PUT", &self.network_path(group, "publicIPAddresses", pip_name))
            .query("api-version", API_VERSION);

        let body = serde_json::json!({
            "location": location,
            "properties": { "publicIPAllocationMethod": "Dynamic" },
        });

        let response: IdResponse = send_json(request, body)?.into_json()?;
        Ok(response.id)
    }

    /// Create the NIC wiring a VM into subnet + NSG + public IP.
    /// Returns the NIC ID for the VM's network profile.
    pub fn create_network_interface(
        &self,
        group: &str,
        nic_name: &str,
        location: &str,
        subnet_id: &str,
        nsg_id: &str,
        public_ip_id: &str,
    ) -> Result<String, ApiError> {
        let request = self
            .request_sub("PUT", &self.network_path(group, "networkInterfaces", nic_name))
            .query("api-version", API_VERSION);

        let body = serde_json::json!({
            "location": location,
            "properties": {
                "networkSecurityGroup": { "id": nsg_id },
                "ipConfigurations": [{
                    "name": "ipconfig1",
                    "properties": {
                        "subnet": { "id": subnet_id },
                        "publicIPAddress": { "id": public_ip_id },
                        "privateIPAllocationMethod": "Dynamic",
                    },
                }],
            },
        });

        let response: IdResponse = send_json(request, body)?.into_json()?;
        Ok(response.id)
    }
}
