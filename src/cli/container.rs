//! Container instance commands

use anyhow::Result;
use tracing::info;

use super::CommandContext;

/// Create a container group with one public container.
pub async fn create_command(
    ctx: &CommandContext,
    name: &str,
    image: &str,
    group: Option<&str>,
    cpu: f64,
    memory_gb: f64,
    port: u16,
) -> Result<()> {
    let group = ctx.resource_group(group)?;
    let location = ctx.location(None);
    let client = ctx.arm()?;

    println!("Creating container group {name} ({image}, {cpu} cpu, {memory_gb} GB) in {group}...");
    let container =
        client.create_container_group(&group, name, &location, image, cpu, memory_gb, port)?;
    info!(container = %container.name, state = %container.state, "container group submitted");

    println!("{} [{}] {}", container.name, container.state, container.image);
    match &container.ip_address {
        Some(ip) => println!("  public endpoint: {ip}:{port}"),
        None => println!("  public IP not yet assigned"),
    }

    Ok(())
}
