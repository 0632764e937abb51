//! RBAC audit command

use std::path::Path;

use anyhow::Result;
use tracing::info;

use azlab::audit::{self, AuditReport};
use azlab::report::{self, OutputFormat};

use super::CommandContext;

/// Build and emit the RBAC audit report.
pub async fn audit_command(
    ctx: &CommandContext,
    scope: Option<&str>,
    output: OutputFormat,
    out_file: Option<&Path>,
) -> Result<()> {
    let arm = ctx.arm()?;
    let graph = ctx.graph()?;
    let scope = scope
        .map(str::to_string)
        .unwrap_or_else(|| arm.subscription_scope());

    let assignments = arm.list_role_assignments(&scope)?;
    let definitions = arm.list_role_definitions(&scope)?;
    info!(
        assignments = assignments.len(),
        definitions = definitions.len(),
        "fetched RBAC snapshot"
    );

    let mut principal_ids: Vec<String> = assignments
        .iter()
        .map(|a| a.principal_id.clone())
        .collect();
    principal_ids.sort();
    principal_ids.dedup();
    let principals = graph.resolve_principals(&principal_ids)?;

    let audit = audit::build_report(&scope, &assignments, &definitions, &principals);

    let rows: Vec<Vec<String>> = audit
        .rows
        .iter()
        .map(|r| {
            vec![
                r.principal_display.clone(),
                r.principal_type.clone(),
                r.role_name.clone(),
                r.role_type.clone(),
                r.scope_level.as_str().to_string(),
                r.scope.clone(),
                r.created_on
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
            ]
        })
        .collect();

    report::emit(
        output,
        out_file,
        &[
            "principal",
            "principal type",
            "role",
            "role type",
            "scope level",
            "scope",
            "created",
        ],
        &rows,
        &audit,
    )?;

    if output == OutputFormat::Table {
        print_summary(&audit);
    }

    Ok(())
}

fn print_summary(audit: &AuditReport) {
    let summary = &audit.summary;
    println!("\nSummary for {}", audit.scope);
    println!("  assignments:         {}", summary.total_assignments);
    println!("  built-in roles:      {}", summary.built_in_role_assignments);
    println!("  custom roles:        {}", summary.custom_role_assignments);
    println!("  orphaned principals: {}", summary.orphaned_assignments);
    println!("  unknown definitions: {}", summary.unknown_definitions);

    if !summary.assignments_by_scope_level.is_empty() {
        println!("  by scope level:");
        for (level, count) in &summary.assignments_by_scope_level {
            println!("    {level}: {count}");
        }
    }
    if !summary.assignments_by_principal_type.is_empty() {
        println!("  by principal type:");
        for (kind, count) in &summary.assignments_by_principal_type {
            println!("    {kind}: {count}");
        }
    }
    if !summary.assignments_by_role.is_empty() {
        println!("  top roles:");
        for (role, count) in summary.assignments_by_role.iter().take(10) {
            println!("    {role}: {count}");
        }
    }
    if !summary.unused_custom_roles.is_empty() {
        println!(
            "  unused custom roles: {}",
            summary.unused_custom_roles.join(", ")
        );
    }
}
