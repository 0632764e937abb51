//! Role definition and role assignment operations
//! (`Microsoft.Authorization`).

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{ApiError, ArmClient, send, send_json};
use crate::domain::{RoleAssignment, RoleDefinition, RoleType};

const API_VERSION: &str = "2022-04-01";

#[derive(Deserialize)]
struct DefinitionWire {
    id: String,
    name: String,
    #[serde(default)]
    properties: DefinitionProperties,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefinitionProperties {
    #[serde(default)]
    role_name: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "type", default)]
    role_type: String,
    #[serde(default)]
    permissions: Vec<PermissionWire>,
    #[serde(default)]
    assignable_scopes: Vec<String>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PermissionWire {
    #[serde(default)]
    actions: Vec<String>,
    #[serde(default)]
    not_actions: Vec<String>,
}

impl From<DefinitionWire> for RoleDefinition {
    fn from(wire: DefinitionWire) -> Self {
        // The API models permissions as a list; in practice there is one
        // entry, and flattening keeps the report rows simple either way.
        let mut actions = Vec::new();
        let mut not_actions = Vec::new();
        for permission in wire.properties.permissions {
            actions.extend(permission.actions);
            not_actions.extend(permission.not_actions);
        }

        RoleDefinition {
            id: wire.id,
            name: wire.name,
            role_name: wire.properties.role_name,
            description: wire.properties.description,
            role_type: RoleType::parse(&wire.properties.role_type),
            actions,
            not_actions,
            assignable_scopes: wire.properties.assignable_scopes,
        }
    }
}

#[derive(Deserialize)]
struct AssignmentWire {
    id: String,
    name: String,
    #[serde(default)]
    properties: AssignmentProperties,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignmentProperties {
    #[serde(default)]
    scope: String,
    #[serde(default)]
    role_definition_id: String,
    #[serde(default)]
    principal_id: String,
    #[serde(default)]
    principal_type: String,
    #[serde(default)]
    created_on: Option<DateTime<Utc>>,
}

impl From<AssignmentWire> for RoleAssignment {
    fn from(wire: AssignmentWire) -> Self {
        RoleAssignment {
            id: wire.id,
            name: wire.name,
            scope: wire.properties.scope,
            role_definition_id: wire.properties.role_definition_id,
            principal_id: wire.properties.principal_id,
            principal_type: wire.properties.principal_type,
            created_on: wire.properties.created_on,
        }
    }
}

impl ArmClient {
    /// List role definitions visible at a scope.
    pub fn list_role_definitions(&self, scope: &str) -> Result<Vec<RoleDefinition>, ApiError> {
        #[derive(Deserialize)]
        struct ListResponse {
            value: Vec<DefinitionWire>,
        }

        let request = self
            .request(
                "GET",
                &format!("{scope}/providers/Microsoft.Authorization/roleDefinitions"),
            )
            .query("api-version", API_VERSION);

        let response: ListResponse = send(request)?.into_json()?;
        Ok(response.value.into_iter().map(Into::into).collect())
    }

    /// Find one role definition by display name.
    pub fn find_role_definition(
        &self,
        scope: &str,
        role_name: &str,
    ) -> Result<Option<RoleDefinition>, ApiError> {
        #[derive(Deserialize)]
        struct ListResponse {
            value: Vec<DefinitionWire>,
        }

        // Single quotes in the filter value are doubled per OData
        let filter = format!("roleName eq '{}'", role_name.replace('\'', "''"));
        let request = self
            .request(
                "GET",
                &format!("{scope}/providers/Microsoft.Authorization/roleDefinitions"),
            )
            .query("api-version", API_VERSION)
            .query("$filter", &filter);

        let response: ListResponse = send(request)?.into_json()?;
        Ok(response.value.into_iter().next().map(Into::into))
    }

    /// Create or update a custom role definition under `definition_guid`.
    pub fn put_role_definition(
        &self,
        scope: &str,
        definition_guid: &str,
        role_name: &str,
        description: &str,
        actions: &[String],
        not_actions: &[String],
        assignable_scopes: &[String],
    ) -> Result<RoleDefinition, ApiError> {
        let request = self
            .request(
                "PUT",
                &format!(
                    "{scope}/providers/Microsoft.Authorization/roleDefinitions/{definition_guid}"
                ),
            )
            .query("api-version", API_VERSION);

        let body = serde_json::json!({
            "name": definition_guid,
            "properties": {
                "roleName": role_name,
                "description": description,
                "type": "CustomRole",
                "permissions": [{
                    "actions": actions,
                    "notActions": not_actions,
                }],
                "assignableScopes": assignable_scopes,
            },
        });

        let wire: DefinitionWire = send_json(request, body)?.into_json()?;
        Ok(wire.into())
    }

    /// List role assignments at and under a scope.
    pub fn list_role_assignments(&self, scope: &str) -> Result<Vec<RoleAssignment>, ApiError> {
        #[derive(Deserialize)]
        struct ListResponse {
            value: Vec<AssignmentWire>,
            #[serde(rename = "nextLink")]
            next_link: Option<String>,
        }

        let mut assignments = Vec::new();
        let mut page: ListResponse = send(
            self.request(
                "GET",
                &format!("{scope}/providers/Microsoft.Authorization/roleAssignments"),
            )
            .query("api-version", API_VERSION),
        )?
        .into_json()?;

        loop {
            assignments.extend(page.value.into_iter().map(RoleAssignment::from));
            match page.next_link {
                Some(url) => page = send(self.request_absolute("GET", &url))?.into_json()?,
                None => break,
            }
        }

        Ok(assignments)
    }

    /// Assign a role to a principal at a scope.
    pub fn create_role_assignment(
        &self,
        scope: &str,
        assignment_guid: &str,
        role_definition_id: &str,
        principal_id: &str,
    ) -> Result<RoleAssignment, ApiError> {
        let request = self
            .request(
                "PUT",
                &format!(
                    "{scope}/providers/Microsoft.Authorization/roleAssignments/{assignment_guid}"
                ),
            )
            .query("api-version", API_VERSION);

        let body = serde_json::json!({
            "properties": {
                "roleDefinitionId": role_definition_id,
                "principalId": principal_id,
            },
        });

        let wire: AssignmentWire = send_json(request, body)?.into_json()?;
        Ok(wire.into())
    }
}
