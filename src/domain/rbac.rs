//! RBAC value objects: role definitions, role assignments, principals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether a role definition is built in or operator defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleType {
    BuiltInRole,
    CustomRole,
}

impl RoleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::BuiltInRole => "BuiltInRole",
            RoleType::CustomRole => "CustomRole",
        }
    }

    /// Parse the `roleType` string the API returns. Anything unrecognized
    /// is treated as built in, which only affects summary bucketing.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("customrole") {
            RoleType::CustomRole
        } else {
            RoleType::BuiltInRole
        }
    }
}

/// A role definition snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Full ARM ID (`/subscriptions/.../roleDefinitions/<guid>`)
    pub id: String,
    /// The definition GUID (the last ID segment)
    pub name: String,
    pub role_name: String,
    pub description: String,
    pub role_type: RoleType,
    pub actions: Vec<String>,
    pub not_actions: Vec<String>,
    pub assignable_scopes: Vec<String>,
}

impl RoleDefinition {
    pub fn is_custom(&self) -> bool {
        self.role_type == RoleType::CustomRole
    }
}

/// A role assignment snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub id: String,
    /// The assignment GUID
    pub name: String,
    pub scope: String,
    /// Full ARM ID of the role definition
    pub role_definition_id: String,
    pub principal_id: String,
    /// User, Group, ServicePrincipal, ... as reported by the API
    pub principal_type: String,
    pub created_on: Option<DateTime<Utc>>,
}

impl RoleAssignment {
    /// The definition GUID this assignment points at.
    pub fn role_definition_guid(&self) -> &str {
        self.role_definition_id
            .rsplit('/')
            .next()
            .unwrap_or(&self.role_definition_id)
    }
}

/// What kind of directory object a principal is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrincipalKind {
    User,
    Group,
    ServicePrincipal,
    Other,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::User => "User",
            PrincipalKind::Group => "Group",
            PrincipalKind::ServicePrincipal => "ServicePrincipal",
            PrincipalKind::Other => "Other",
        }
    }

    /// Map a Graph `@odata.type` (e.g. `#microsoft.graph.user`) to a kind.
    pub fn from_odata_type(odata_type: &str) -> Self {
        match odata_type.rsplit('.').next() {
            Some("user") => PrincipalKind::User,
            Some("group") => PrincipalKind::Group,
            Some("servicePrincipal") => PrincipalKind::ServicePrincipal,
            _ => PrincipalKind::Other,
        }
    }
}

/// A directory principal resolved for the audit report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub object_id: String,
    pub display_name: String,
    pub user_principal_name: Option<String>,
    pub kind: PrincipalKind,
}

/// Principals indexed by object ID
pub type Principals = HashMap<String, Principal>;

/// The granularity of an assignment scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeLevel {
    ManagementGroup,
    Subscription,
    ResourceGroup,
    Resource,
}

impl ScopeLevel {
    /// Classify an ARM scope string.
    ///
    /// `/providers/Microsoft.Management/managementGroups/x` → ManagementGroup,
    /// `/subscriptions/x` → Subscription,
    /// `/subscriptions/x/resourceGroups/y` → ResourceGroup,
    /// anything deeper (or unrecognized) → Resource.
    pub fn of(scope: &str) -> Self {
        let segments: Vec<&str> = scope.split('/').filter(|s| !s.is_empty()).collect();
        if segments
            .first()
            .is_some_and(|s| s.eq_ignore_ascii_case("providers"))
            && segments
                .get(1)
                .is_some_and(|s| s.eq_ignore_ascii_case("Microsoft.Management"))
        {
            return ScopeLevel::ManagementGroup;
        }
        if segments
            .first()
            .is_some_and(|s| s.eq_ignore_ascii_case("subscriptions"))
        {
            return match segments.len() {
                0 | 1 => ScopeLevel::Resource,
                2 => ScopeLevel::Subscription,
                3 | 4 => {
                    if segments[2].eq_ignore_ascii_case("resourcegroups") {
                        ScopeLevel::ResourceGroup
                    } else {
                        ScopeLevel::Resource
                    }
                }
                _ => ScopeLevel::Resource,
            };
        }
        ScopeLevel::Resource
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeLevel::ManagementGroup => "ManagementGroup",
            ScopeLevel::Subscription => "Subscription",
            ScopeLevel::ResourceGroup => "ResourceGroup",
            ScopeLevel::Resource => "Resource",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_level_classification() {
        assert_eq!(
            ScopeLevel::of("/providers/Microsoft.Management/managementGroups/root"),
            ScopeLevel::ManagementGroup
        );
        assert_eq!(ScopeLevel::of("/subscriptions/0000"), ScopeLevel::Subscription);
        assert_eq!(
            ScopeLevel::of("/subscriptions/0000/resourceGroups/lab-rg"),
            ScopeLevel::ResourceGroup
        );
        assert_eq!(
            ScopeLevel::of(
                "/subscriptions/0000/resourceGroups/lab-rg/providers/Microsoft.Storage/storageAccounts/lab01"
            ),
            ScopeLevel::Resource
        );
    }

    #[test]
    fn scope_level_is_case_insensitive() {
        assert_eq!(
            ScopeLevel::of("/subscriptions/0000/resourcegroups/lab-rg"),
            ScopeLevel::ResourceGroup
        );
    }

    #[test]
    fn unrecognized_scope_is_resource() {
        assert_eq!(ScopeLevel::of("/weird/thing"), ScopeLevel::Resource);
        assert_eq!(ScopeLevel::of(""), ScopeLevel::Resource);
    }

    #[test]
    fn role_definition_guid_is_last_segment() {
        let assignment = RoleAssignment {
            id: "/subscriptions/0000/providers/Microsoft.Authorization/roleAssignments/a1".into(),
            name: "a1".into(),
            scope: "/subscriptions/0000".into(),
            role_definition_id:
                "/subscriptions/0000/providers/Microsoft.Authorization/roleDefinitions/b2".into(),
            principal_id: "p1".into(),
            principal_type: "User".into(),
            created_on: None,
        };
        assert_eq!(assignment.role_definition_guid(), "b2");
    }

    #[test]
    fn principal_kind_from_odata_type() {
        assert_eq!(
            PrincipalKind::from_odata_type("#microsoft.graph.user"),
            PrincipalKind::User
        );
        assert_eq!(
            PrincipalKind::from_odata_type("#microsoft.graph.servicePrincipal"),
            PrincipalKind::ServicePrincipal
        );
        assert_eq!(
            PrincipalKind::from_odata_type("#microsoft.graph.device"),
            PrincipalKind::Other
        );
    }
}
