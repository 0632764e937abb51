//! Storage account commands

use std::time::Duration;

use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use azlab::report;

use super::{CommandContext, args};

/// Storage account names: global, lowercase alphanumeric, 3-24 characters
static STORAGE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]{3,24}$").expect("valid regex"));

/// Attempts to observe `provisioningState == Succeeded` after an async create
const CREATE_POLL_ATTEMPTS: u32 = 24;
const CREATE_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub fn valid_storage_name(name: &str) -> bool {
    STORAGE_NAME.is_match(name)
}

/// Create a StorageV2 account.
pub async fn create_command(
    ctx: &CommandContext,
    name: &str,
    group: Option<&str>,
    sku: Option<&str>,
    access_tier: Option<&str>,
    tag_args: &[String],
) -> Result<()> {
    if !valid_storage_name(name) {
        bail!("Invalid storage account name '{name}': 3-24 lowercase letters and digits");
    }

    let tags = args::parse_tags(tag_args)?;
    let group = ctx.resource_group(group)?;
    let sku = sku.unwrap_or(&ctx.config.defaults.storage_sku);
    let location = ctx.location(None);
    let client = ctx.arm()?;

    let (available, reason) = client.check_storage_name(name)?;
    if !available {
        bail!(
            "Storage account name '{name}' is taken: {}",
            reason.unwrap_or_else(|| "already in use".to_string())
        );
    }

    println!("Creating storage account {name} ({sku}) in {group}...");
    let created = client.create_storage_account(&group, name, &location, sku, access_tier, &tags)?;

    let account = match created {
        Some(account) => account,
        None => {
            // Accepted asynchronously; watch the provisioning state
            let mut waited = None;
            for _ in 0..CREATE_POLL_ATTEMPTS {
                tokio::time::sleep(CREATE_POLL_INTERVAL).await;
                let (account, state) = client.get_storage_account(&group, name)?;
                info!(account = name, state = %state, "storage provisioning");
                if state.eq_ignore_ascii_case("succeeded") {
                    waited = Some(account);
                    break;
                }
            }
            match waited {
                Some(account) => account,
                None => bail!("Storage account {name} did not finish provisioning in time"),
            }
        }
    };

    println!(
        "{} [{}] {} {}",
        account.name,
        account.sku,
        account.location,
        account.access_tier.as_deref().unwrap_or("-")
    );
    if !account.tags.is_empty() {
        println!("  tags: {}", report::format_tags(&account.tags));
    }

    Ok(())
}
