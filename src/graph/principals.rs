//! Batched principal resolution for the audit report.

use serde::Deserialize;

use super::GraphClient;
use crate::arm::{ApiError, send_json};
use crate::domain::{Principal, PrincipalKind, Principals};

/// Upper bound the directory API puts on one getByIds call
const GET_BY_IDS_BATCH: usize = 1000;

impl GraphClient {
    /// Resolve directory objects for a set of principal IDs.
    ///
    /// IDs the directory no longer knows (deleted users, foreign tenants)
    /// are simply absent from the result; the audit layer reports those
    /// assignments as orphaned.
    pub fn resolve_principals(&self, ids: &[String]) -> Result<Principals, ApiError> {
        #[derive(Deserialize)]
        struct GetByIdsResponse {
            #[serde(default)]
            value: Vec<DirectoryObjectWire>,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct DirectoryObjectWire {
            #[serde(rename = "@odata.type", default)]
            odata_type: String,
            id: String,
            #[serde(default)]
            display_name: String,
            #[serde(default)]
            user_principal_name: Option<String>,
        }

        let mut principals = Principals::new();
        for chunk in ids.chunks(GET_BY_IDS_BATCH) {
            let body = serde_json::json!({
                "ids": chunk,
                "types": ["user", "group", "servicePrincipal"],
            });

            let response: GetByIdsResponse =
                send_json(self.request("POST", "/directoryObjects/getByIds"), body)?
                    .into_json()?;

            for object in response.value {
                principals.insert(
                    object.id.clone(),
                    Principal {
                        object_id: object.id,
                        display_name: object.display_name,
                        user_principal_name: object.user_principal_name,
                        kind: PrincipalKind::from_odata_type(&object.odata_type),
                    },
                );
            }
        }

        Ok(principals)
    }
}
