//! Inventory command

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use azlab::domain::GenericResource;
use azlab::report::{self, OutputFormat};

use super::CommandContext;

#[derive(Serialize)]
struct InventoryReport<'a> {
    subscription_id: &'a str,
    resources: &'a [GenericResource],
}

/// List resources and their tags, in the chosen output format.
pub async fn inventory_command(
    ctx: &CommandContext,
    group: Option<&str>,
    output: OutputFormat,
    out_file: Option<&Path>,
) -> Result<()> {
    let client = ctx.arm()?;
    let mut resources = client.list_resources(group)?;
    resources.sort_by(|a, b| {
        (&a.resource_group, &a.resource_type, &a.name)
            .cmp(&(&b.resource_group, &b.resource_type, &b.name))
    });

    if resources.is_empty() {
        println!("No resources found.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = resources
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.resource_type.clone(),
                r.resource_group.clone(),
                r.location.clone(),
                report::format_tags(&r.tags),
            ]
        })
        .collect();

    let inventory = InventoryReport {
        subscription_id: client.subscription_id(),
        resources: &resources,
    };

    report::emit(
        output,
        out_file,
        &["name", "type", "group", "location", "tags"],
        &rows,
        &inventory,
    )?;

    if output == OutputFormat::Table {
        println!("\n{} resource(s)", resources.len());
    }

    Ok(())
}
