//! Teardown command

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{info, warn};

use azlab::arm::PendingDeletion;
use azlab::prompt;

use super::CommandContext;

/// Delete every resource group matching the prefix, then poll the
/// deletions until they finish.
pub async fn teardown_command(
    ctx: &CommandContext,
    prefix: &str,
    yes: bool,
    no_wait: bool,
) -> Result<()> {
    let client = ctx.arm()?;

    let matching: Vec<_> = client
        .list_resource_groups()?
        .into_iter()
        .filter(|g| g.name.starts_with(prefix))
        .collect();

    if matching.is_empty() {
        println!("No resource groups match prefix '{prefix}'.");
        return Ok(());
    }

    println!("Resource groups matching '{prefix}' ({}):", matching.len());
    for group in &matching {
        println!("  {}  {}  [{}]", group.name, group.location, group.provisioning_state);
    }

    if !yes
        && !prompt::confirm(&format!(
            "Delete {} resource group(s) and everything in them?",
            matching.len()
        ))?
    {
        println!("Cancelled.");
        return Ok(());
    }

    // Fire all deletions first, then watch them together
    let mut pending: Vec<PendingDeletion> = Vec::new();
    for group in &matching {
        match client.delete_resource_group(&group.name) {
            Ok(Some(deletion)) => {
                info!(group = %group.name, "deletion accepted");
                println!("Deleting {}...", group.name);
                pending.push(deletion);
            }
            Ok(None) => println!("{} already gone.", group.name),
            Err(err) => {
                warn!(group = %group.name, error = %err, "deletion failed to start");
                eprintln!("Warning: {} failed: {err}", group.name);
            }
        }
    }

    if no_wait {
        println!("{} deletion(s) running; not waiting.", pending.len());
        return Ok(());
    }

    let interval = Duration::from_secs(ctx.config.teardown.poll_interval_secs.max(1));
    let timeout = Duration::from_secs(ctx.config.teardown.poll_timeout_secs);
    let started = Instant::now();

    while !pending.is_empty() {
        if started.elapsed() > timeout {
            let names: Vec<&str> = pending.iter().map(|p| p.name.as_str()).collect();
            println!(
                "Timed out after {}s; still deleting server side: {}",
                timeout.as_secs(),
                names.join(", ")
            );
            return Ok(());
        }

        tokio::time::sleep(interval).await;

        let mut still_pending = Vec::with_capacity(pending.len());
        for deletion in pending {
            match client.deletion_finished(&deletion) {
                Ok(true) => {
                    println!("{} deleted.", deletion.name);
                }
                Ok(false) => still_pending.push(deletion),
                Err(err) => {
                    // Poll errors are transient more often than not; keep
                    // the deletion in the set and try again next round.
                    warn!(group = %deletion.name, error = %err, "poll failed");
                    still_pending.push(deletion);
                }
            }
        }
        pending = still_pending;

        if !pending.is_empty() {
            info!(remaining = pending.len(), "waiting on deletions");
        }
    }

    println!("Teardown complete.");
    Ok(())
}
