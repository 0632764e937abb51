//! Custom role and role assignment commands

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use azlab::report;

use super::CommandContext;

/// The JSON role template operators keep in their lab repos
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleTemplate {
    pub role_name: String,
    #[serde(default)]
    pub description: String,
    pub actions: Vec<String>,
    #[serde(default)]
    pub not_actions: Vec<String>,
    #[serde(default)]
    pub assignable_scopes: Vec<String>,
}

pub fn read_role_template(path: &Path) -> Result<RoleTemplate> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let template: RoleTemplate = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse role template {}", path.display()))?;
    if template.role_name.is_empty() {
        bail!("Role template {} has an empty roleName", path.display());
    }
    if template.actions.is_empty() {
        bail!("Role template {} has no actions", path.display());
    }
    Ok(template)
}

/// Create or update a custom role from a JSON template.
pub async fn create_command(ctx: &CommandContext, file: &Path) -> Result<()> {
    let template = read_role_template(file)?;
    let client = ctx.arm()?;
    let scope = client.subscription_scope();

    // Reuse the GUID when the role already exists so the PUT is an update
    let existing = client.find_role_definition(&scope, &template.role_name)?;
    let (definition_guid, verb) = match &existing {
        Some(def) => {
            if !def.is_custom() {
                bail!("'{}' is a built-in role and cannot be changed", template.role_name);
            }
            (def.name.clone(), "Updated")
        }
        None => (Uuid::new_v4().to_string(), "Created"),
    };

    let assignable_scopes = if template.assignable_scopes.is_empty() {
        vec![scope.clone()]
    } else {
        template.assignable_scopes.clone()
    };

    let definition = client.put_role_definition(
        &scope,
        &definition_guid,
        &template.role_name,
        &template.description,
        &template.actions,
        &template.not_actions,
        &assignable_scopes,
    )?;
    info!(role = %definition.role_name, guid = %definition.name, "role definition written");

    println!("{verb} custom role '{}' ({})", definition.role_name, definition.name);
    println!("  actions: {}", definition.actions.join(", "));
    if !definition.not_actions.is_empty() {
        println!("  notActions: {}", definition.not_actions.join(", "));
    }
    println!("  assignable scopes: {}", definition.assignable_scopes.len());

    Ok(())
}

/// Assign a role (by display name) to a principal.
pub async fn assign_command(
    ctx: &CommandContext,
    role: &str,
    principal_id: &str,
    scope: Option<&str>,
) -> Result<()> {
    let client = ctx.arm()?;
    let subscription_scope = client.subscription_scope();
    let scope = scope.unwrap_or(&subscription_scope);

    let definition = client
        .find_role_definition(&subscription_scope, role)?
        .with_context(|| format!("No role definition named '{role}'"))?;

    let assignment_guid = Uuid::new_v4().to_string();
    let assignment =
        client.create_role_assignment(scope, &assignment_guid, &definition.id, principal_id)?;
    info!(assignment = %assignment.name, role = %definition.role_name, "role assigned");

    println!(
        "Assigned '{}' to {} at {}",
        definition.role_name, principal_id, assignment.scope
    );

    Ok(())
}

/// List role definitions.
pub async fn list_command(ctx: &CommandContext, custom_only: bool) -> Result<()> {
    let client = ctx.arm()?;
    let scope = client.subscription_scope();
    let mut definitions = client.list_role_definitions(&scope)?;

    if custom_only {
        definitions.retain(|d| d.is_custom());
    }
    definitions.sort_by(|a, b| a.role_name.cmp(&b.role_name));

    if definitions.is_empty() {
        println!("No role definitions found.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = definitions
        .iter()
        .map(|d| {
            vec![
                d.role_name.clone(),
                d.role_type.as_str().to_string(),
                d.actions.len().to_string(),
                d.description.chars().take(60).collect(),
            ]
        })
        .collect();

    print!(
        "{}",
        report::render_table(&["role", "type", "actions", "description"], &rows)
    );
    println!("\n{} definition(s)", definitions.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn role_template_parses_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "roleName": "Lab Operator",
                "description": "Start and stop lab VMs",
                "actions": ["Microsoft.Compute/virtualMachines/start/action"]
            }}"#
        )
        .unwrap();

        let template = read_role_template(file.path()).unwrap();
        assert_eq!(template.role_name, "Lab Operator");
        assert!(template.not_actions.is_empty());
        assert!(template.assignable_scopes.is_empty());
    }

    #[test]
    fn role_template_requires_actions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"roleName": "Empty", "actions": []}}"#).unwrap();
        assert!(read_role_template(file.path()).is_err());
    }
}
