//! Resource group commands

use anyhow::Result;
use tracing::info;

use azlab::report;

use super::{CommandContext, args};

/// Create a resource group, or update the tags of an existing one.
pub async fn create_command(
    ctx: &CommandContext,
    name: &str,
    location: Option<&str>,
    tag_args: &[String],
) -> Result<()> {
    let tags = args::parse_tags(tag_args)?;
    let location = ctx.location(location);
    let client = ctx.arm()?;

    match client.get_resource_group(name)? {
        Some(existing) => {
            println!(
                "Resource group {} already exists in {} - updating tags.",
                existing.name, existing.location
            );
        }
        None => {
            println!("Creating resource group {name} in {location}...");
        }
    }

    let group = client.create_resource_group(name, &location, &tags)?;
    info!(group = %group.name, state = %group.provisioning_state, "resource group ready");

    println!(
        "{} [{}] {}",
        group.name, group.provisioning_state, group.location
    );
    if !group.tags.is_empty() {
        println!("  tags: {}", report::format_tags(&group.tags));
    }

    Ok(())
}

/// List resource groups.
pub async fn list_command(ctx: &CommandContext) -> Result<()> {
    let client = ctx.arm()?;
    let groups = client.list_resource_groups()?;

    if groups.is_empty() {
        println!("No resource groups found.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = groups
        .iter()
        .map(|g| {
            vec![
                g.name.clone(),
                g.location.clone(),
                g.provisioning_state.clone(),
                report::format_tags(&g.tags),
            ]
        })
        .collect();

    print!(
        "{}",
        report::render_table(&["name", "location", "state", "tags"], &rows)
    );
    println!("\n{} group(s)", groups.len());

    Ok(())
}
