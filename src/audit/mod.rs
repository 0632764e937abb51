//! RBAC audit aggregation.
//!
//! Cross-references role assignments with role definitions and directory
//! principals into a unified report, then tallies summary statistics in a
//! single pass. Pure functions over already-fetched snapshots; the command
//! layer does the fetching.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Principals, RoleAssignment, RoleDefinition, RoleType, ScopeLevel};

/// Placeholder for assignments whose principal no longer resolves
pub const ORPHANED_PRINCIPAL: &str = "(orphaned)";
/// Placeholder for assignments whose definition is not visible at the scope
pub const UNKNOWN_DEFINITION: &str = "(unknown definition)";

/// One unified report row: assignment + definition + principal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRow {
    pub assignment_name: String,
    pub principal_display: String,
    pub principal_type: String,
    pub role_name: String,
    pub role_type: String,
    pub scope: String,
    pub scope_level: ScopeLevel,
    pub created_on: Option<DateTime<Utc>>,
}

/// Aggregate statistics over the report rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total_assignments: usize,
    pub built_in_role_assignments: usize,
    pub custom_role_assignments: usize,
    pub orphaned_assignments: usize,
    pub unknown_definitions: usize,
    /// (scope level, count), descending
    pub assignments_by_scope_level: Vec<(String, usize)>,
    /// (principal type, count), descending
    pub assignments_by_principal_type: Vec<(String, usize)>,
    /// (role name, count), descending
    pub assignments_by_role: Vec<(String, usize)>,
    /// Custom role definitions with no assignment at the audited scope
    pub unused_custom_roles: Vec<String>,
}

/// The full audit report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub scope: String,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<AuditRow>,
    pub summary: AuditSummary,
}

/// Join assignments, definitions, and principals into the unified report.
pub fn build_report(
    scope: &str,
    assignments: &[RoleAssignment],
    definitions: &[RoleDefinition],
    principals: &Principals,
) -> AuditReport {
    let definitions_by_guid: HashMap<&str, &RoleDefinition> = definitions
        .iter()
        .map(|d| (d.name.as_str(), d))
        .collect();

    let mut rows = Vec::with_capacity(assignments.len());
    let mut summary = AuditSummary::default();
    let mut by_scope_level: HashMap<&'static str, usize> = HashMap::new();
    let mut by_principal_type: HashMap<String, usize> = HashMap::new();
    let mut by_role: HashMap<String, usize> = HashMap::new();
    let mut assigned_definition_guids: HashMap<&str, usize> = HashMap::new();

    for assignment in assignments {
        let definition = definitions_by_guid
            .get(assignment.role_definition_guid())
            .copied();
        let principal = principals.get(&assignment.principal_id);

        let (role_name, role_type) = match definition {
            Some(def) => {
                *assigned_definition_guids
                    .entry(def.name.as_str())
                    .or_insert(0) += 1;
                match def.role_type {
                    RoleType::CustomRole => summary.custom_role_assignments += 1,
                    RoleType::BuiltInRole => summary.built_in_role_assignments += 1,
                }
                (def.role_name.clone(), def.role_type.as_str().to_string())
            }
            None => {
                summary.unknown_definitions += 1;
                (UNKNOWN_DEFINITION.to_string(), String::new())
            }
        };

        // The assignment itself records a principal type; prefer what the
        // directory says when the principal still resolves.
        let (principal_display, principal_type) = match principal {
            Some(p) => (p.display_name.clone(), p.kind.as_str().to_string()),
            None => {
                summary.orphaned_assignments += 1;
                let fallback = if assignment.principal_type.is_empty() {
                    "Unknown".to_string()
                } else {
                    assignment.principal_type.clone()
                };
                (ORPHANED_PRINCIPAL.to_string(), fallback)
            }
        };

        let scope_level = ScopeLevel::of(&assignment.scope);
        *by_scope_level.entry(scope_level.as_str()).or_insert(0) += 1;
        *by_principal_type.entry(principal_type.clone()).or_insert(0) += 1;
        *by_role.entry(role_name.clone()).or_insert(0) += 1;

        rows.push(AuditRow {
            assignment_name: assignment.name.clone(),
            principal_display,
            principal_type,
            role_name,
            role_type,
            scope: assignment.scope.clone(),
            scope_level,
            created_on: assignment.created_on,
        });
    }

    summary.total_assignments = rows.len();
    summary.assignments_by_scope_level = sorted_counts(by_scope_level);
    summary.assignments_by_principal_type = sorted_counts(by_principal_type);
    summary.assignments_by_role = sorted_counts(by_role);

    let mut unused: Vec<String> = definitions
        .iter()
        .filter(|d| d.is_custom() && !assigned_definition_guids.contains_key(d.name.as_str()))
        .map(|d| d.role_name.clone())
        .collect();
    unused.sort();
    summary.unused_custom_roles = unused;

    // Deterministic row order: scope, then principal, then role
    rows.sort_by(|a, b| {
        (&a.scope, &a.principal_display, &a.role_name)
            .cmp(&(&b.scope, &b.principal_display, &b.role_name))
    });

    AuditReport {
        scope: scope.to_string(),
        generated_at: Utc::now(),
        rows,
        summary,
    }
}

/// Turn a count map into a (key, count) list sorted by descending count,
/// ties broken by key so output is stable.
fn sorted_counts<K: Into<String>>(map: HashMap<K, usize>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> =
        map.into_iter().map(|(k, v)| (k.into(), v)).collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Principal, PrincipalKind};

    fn definition(guid: &str, role_name: &str, role_type: RoleType) -> RoleDefinition {
        RoleDefinition {
            id: format!("/subscriptions/0000/providers/Microsoft.Authorization/roleDefinitions/{guid}"),
            name: guid.to_string(),
            role_name: role_name.to_string(),
            description: String::new(),
            role_type,
            actions: vec!["*/read".to_string()],
            not_actions: Vec::new(),
            assignable_scopes: vec!["/subscriptions/0000".to_string()],
        }
    }

    fn assignment(name: &str, definition_guid: &str, principal_id: &str, scope: &str) -> RoleAssignment {
        RoleAssignment {
            id: format!("{scope}/providers/Microsoft.Authorization/roleAssignments/{name}"),
            name: name.to_string(),
            scope: scope.to_string(),
            role_definition_id: format!(
                "/subscriptions/0000/providers/Microsoft.Authorization/roleDefinitions/{definition_guid}"
            ),
            principal_id: principal_id.to_string(),
            principal_type: "User".to_string(),
            created_on: None,
        }
    }

    fn principal(id: &str, name: &str, kind: PrincipalKind) -> Principal {
        Principal {
            object_id: id.to_string(),
            display_name: name.to_string(),
            user_principal_name: None,
            kind,
        }
    }

    #[test]
    fn joins_assignment_definition_and_principal() {
        let definitions = vec![definition("d1", "Reader", RoleType::BuiltInRole)];
        let assignments = vec![assignment("a1", "d1", "p1", "/subscriptions/0000")];
        let mut principals = Principals::new();
        principals.insert("p1".into(), principal("p1", "Lab User", PrincipalKind::User));

        let report = build_report("/subscriptions/0000", &assignments, &definitions, &principals);

        assert_eq!(report.rows.len(), 1);
        let row = &report.rows[0];
        assert_eq!(row.principal_display, "Lab User");
        assert_eq!(row.principal_type, "User");
        assert_eq!(row.role_name, "Reader");
        assert_eq!(row.role_type, "BuiltInRole");
        assert_eq!(row.scope_level, ScopeLevel::Subscription);
        assert_eq!(report.summary.total_assignments, 1);
        assert_eq!(report.summary.built_in_role_assignments, 1);
        assert_eq!(report.summary.orphaned_assignments, 0);
    }

    #[test]
    fn missing_principal_is_orphaned_with_fallback_type() {
        let definitions = vec![definition("d1", "Reader", RoleType::BuiltInRole)];
        let assignments = vec![assignment("a1", "d1", "gone", "/subscriptions/0000")];

        let report =
            build_report("/subscriptions/0000", &assignments, &definitions, &Principals::new());

        assert_eq!(report.rows[0].principal_display, ORPHANED_PRINCIPAL);
        assert_eq!(report.rows[0].principal_type, "User");
        assert_eq!(report.summary.orphaned_assignments, 1);
    }

    #[test]
    fn missing_definition_is_counted() {
        let assignments = vec![assignment("a1", "nope", "p1", "/subscriptions/0000")];
        let mut principals = Principals::new();
        principals.insert("p1".into(), principal("p1", "Lab User", PrincipalKind::User));

        let report = build_report("/subscriptions/0000", &assignments, &[], &principals);

        assert_eq!(report.rows[0].role_name, UNKNOWN_DEFINITION);
        assert_eq!(report.summary.unknown_definitions, 1);
        assert_eq!(report.summary.built_in_role_assignments, 0);
        assert_eq!(report.summary.custom_role_assignments, 0);
    }

    #[test]
    fn summary_tallies_group_and_sort() {
        let definitions = vec![
            definition("d1", "Reader", RoleType::BuiltInRole),
            definition("d2", "Lab Operator", RoleType::CustomRole),
            definition("d3", "Untouched Custom", RoleType::CustomRole),
        ];
        let assignments = vec![
            assignment("a1", "d1", "p1", "/subscriptions/0000"),
            assignment("a2", "d1", "p2", "/subscriptions/0000/resourceGroups/rg1"),
            assignment("a3", "d2", "p1", "/subscriptions/0000/resourceGroups/rg1"),
        ];
        let mut principals = Principals::new();
        principals.insert("p1".into(), principal("p1", "Alex", PrincipalKind::User));
        principals.insert("p2".into(), principal("p2", "Ops Group", PrincipalKind::Group));

        let report = build_report("/subscriptions/0000", &assignments, &definitions, &principals);

        assert_eq!(report.summary.total_assignments, 3);
        assert_eq!(report.summary.built_in_role_assignments, 2);
        assert_eq!(report.summary.custom_role_assignments, 1);
        assert_eq!(
            report.summary.assignments_by_role,
            vec![("Reader".to_string(), 2), ("Lab Operator".to_string(), 1)]
        );
        assert_eq!(
            report.summary.assignments_by_scope_level,
            vec![("ResourceGroup".to_string(), 2), ("Subscription".to_string(), 1)]
        );
        assert_eq!(
            report.summary.assignments_by_principal_type,
            vec![("User".to_string(), 2), ("Group".to_string(), 1)]
        );
        assert_eq!(report.summary.unused_custom_roles, vec!["Untouched Custom".to_string()]);
    }

    #[test]
    fn rows_are_sorted_for_stable_output() {
        let definitions = vec![definition("d1", "Reader", RoleType::BuiltInRole)];
        let assignments = vec![
            assignment("a2", "d1", "p2", "/subscriptions/0000/resourceGroups/rg1"),
            assignment("a1", "d1", "p1", "/subscriptions/0000"),
        ];
        let mut principals = Principals::new();
        principals.insert("p1".into(), principal("p1", "Alex", PrincipalKind::User));
        principals.insert("p2".into(), principal("p2", "Bo", PrincipalKind::User));

        let report = build_report("/subscriptions/0000", &assignments, &definitions, &principals);
        assert_eq!(report.rows[0].assignment_name, "a1");
        assert_eq!(report.rows[1].assignment_name, "a2");
    }
}
