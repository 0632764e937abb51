//! CLI command definitions for azlab.

use std::path::PathBuf;

use clap::Subcommand;

use azlab::report::OutputFormat;

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the ~/.azlab/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Manage resource groups
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },

    /// Manage storage accounts
    Storage {
        #[command(subcommand)]
        command: StorageCommands,
    },

    /// Manage virtual machines
    Vm {
        #[command(subcommand)]
        command: VmCommands,
    },

    /// Manage container instances
    Container {
        #[command(subcommand)]
        command: ContainerCommands,
    },

    /// Manage directory users
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage custom roles and role assignments
    Role {
        #[command(subcommand)]
        command: RoleCommands,
    },

    /// List resources and their tags across the subscription
    Inventory {
        /// Only list resources in this resource group
        #[arg(long)]
        group: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
        /// Write CSV/JSON output to this file instead of stdout
        #[arg(long)]
        out_file: Option<PathBuf>,
    },

    /// Cross-reference role assignments, definitions and principals into
    /// an RBAC report with summary statistics
    Audit {
        /// Scope to audit (defaults to the whole subscription)
        #[arg(long)]
        scope: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
        /// Write CSV/JSON output to this file instead of stdout
        #[arg(long)]
        out_file: Option<PathBuf>,
    },

    /// Recommend VM sizes from CPU utilization
    Rightsize {
        /// Only examine VMs in this resource group
        #[arg(long)]
        group: Option<String>,
        /// Lookback window in days
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
        /// Write CSV/JSON output to this file instead of stdout
        #[arg(long)]
        out_file: Option<PathBuf>,
    },

    /// Delete all resource groups matching a name prefix
    Teardown {
        /// Resource group name prefix to match
        #[arg(long)]
        prefix: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
        /// Fire the deletions without waiting for them to finish
        #[arg(long)]
        no_wait: bool,
    },
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a resource group (or update its tags)
    Create {
        name: String,
        /// Region (defaults to the configured location)
        #[arg(long)]
        location: Option<String>,
        /// Tag in key=value form (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List resource groups
    List,
}

#[derive(Subcommand)]
pub enum StorageCommands {
    /// Create a StorageV2 account
    Create {
        /// Account name (lowercase letters and digits, 3-24 characters)
        name: String,
        /// Resource group (defaults to the configured group)
        #[arg(long)]
        group: Option<String>,
        /// SKU, e.g. Standard_LRS
        #[arg(long)]
        sku: Option<String>,
        /// Access tier (Hot or Cool)
        #[arg(long)]
        access_tier: Option<String>,
        /// Tag in key=value form (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum VmCommands {
    /// Create one or more Linux VMs with their network plumbing
    Create {
        /// Base VM name (additional VMs get -2, -3, ... suffixes)
        name: String,
        /// Resource group (defaults to the configured group)
        #[arg(long)]
        group: Option<String>,
        /// VM size (defaults to the configured size)
        #[arg(long)]
        size: Option<String>,
        /// Image as publisher:offer:sku:version
        #[arg(long)]
        image: Option<String>,
        /// Admin username (defaults to the configured username)
        #[arg(long)]
        admin_user: Option<String>,
        /// Admin password (generated when omitted)
        #[arg(long)]
        admin_password: Option<String>,
        /// Number of VMs to create
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
}

#[derive(Subcommand)]
pub enum ContainerCommands {
    /// Create a container group with a single public container
    Create {
        name: String,
        /// Container image, e.g. nginx:latest
        #[arg(long)]
        image: String,
        /// Resource group (defaults to the configured group)
        #[arg(long)]
        group: Option<String>,
        /// CPU cores
        #[arg(long, default_value_t = 1.0)]
        cpu: f64,
        /// Memory in GB
        #[arg(long, default_value_t = 1.5)]
        memory_gb: f64,
        /// Exposed TCP port
        #[arg(long, default_value_t = 80)]
        port: u16,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Bulk-create directory users from a CSV file
    /// (columns: display_name,mail_nickname[,job_title])
    Import {
        file: PathBuf,
        /// UPN domain (defaults to the configured domain)
        #[arg(long)]
        domain: Option<String>,
        /// Shared initial password (generated per user when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Do not require a password change at first sign-in
        #[arg(long)]
        no_password_change: bool,
    },
    /// Delete all users whose UPN starts with a prefix
    Remove {
        /// UPN prefix to match
        #[arg(long)]
        prefix: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum RoleCommands {
    /// Create or update a custom role from a JSON template
    Create {
        /// Template file (roleName, description, actions, notActions,
        /// assignableScopes)
        #[arg(long)]
        file: PathBuf,
    },
    /// Assign a role to a principal
    Assign {
        /// Role display name, e.g. "Reader" or a custom role name
        #[arg(long)]
        role: String,
        /// Principal object ID
        #[arg(long)]
        principal: String,
        /// Assignment scope (defaults to the whole subscription)
        #[arg(long)]
        scope: Option<String>,
    },
    /// List role definitions
    List {
        /// Only show custom roles
        #[arg(long)]
        custom_only: bool,
    },
}
