//! Init command implementation

use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::info;

use azlab::config::Config;

/// Default configuration content for azlab init
pub const DEFAULT_CONFIG: &str = r#"# azlab configuration
# ===================
#
# Bearer tokens are never stored here. Export them before running:
#   AZLAB_ARM_TOKEN    az account get-access-token --query accessToken -o tsv
#   AZLAB_GRAPH_TOKEN  az account get-access-token --resource-type ms-graph --query accessToken -o tsv

[azure]
# The subscription the lab lives in (required)
subscription_id = ""
tenant_id = ""

[endpoints]
# Public-cloud endpoints; change for sovereign clouds
management = "https://management.azure.com"
graph = "https://graph.microsoft.com"

[defaults]
# Used whenever a command omits the matching flag
location = "westeurope"
resource_group = ""
vm_size = "Standard_B2s"
vm_image = "Canonical:ubuntu-24_04-lts:server:latest"
admin_username = "labadmin"
storage_sku = "Standard_LRS"
# Directory domain for bulk-created users, e.g. contoso.onmicrosoft.com
user_domain = ""

[teardown]
# Seconds between polls of pending resource-group deletions
poll_interval_secs = 10
# Give up waiting after this many seconds (deletions keep running server side)
poll_timeout_secs = 1800
"#;

/// Write the default config file.
pub async fn init_command(config_override: Option<&Path>, force: bool) -> Result<()> {
    let path = match config_override {
        Some(p) => p.to_path_buf(),
        None => Config::global_config_path(),
    };

    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    std::fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    info!(path = %path.display(), "wrote default config");
    println!("Created {}", path.display());
    println!("Next steps:");
    println!("  1. Set azure.subscription_id (and defaults.resource_group)");
    println!("  2. Export AZLAB_ARM_TOKEN / AZLAB_GRAPH_TOKEN");
    println!("  3. azlab group create my-lab-rg --tag env=lab");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_template_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.endpoints.management, "https://management.azure.com");
        assert_eq!(config.defaults.vm_size, "Standard_B2s");
        assert_eq!(config.teardown.poll_timeout_secs, 1800);
    }
}
