use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use azlab::config::Config;

mod cli;
mod commands;

use commands::{
    Commands, ContainerCommands, GroupCommands, RoleCommands, StorageCommands, UserCommands,
    VmCommands,
};

#[derive(Parser)]
#[command(name = "azlab")]
#[command(about = "Provision, inventory, audit and tear down Azure certification-lab environments")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.azlab/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subscription ID (overrides the configured subscription)
    #[arg(short, long, global = true)]
    subscription: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Init runs before any config exists
    if let Commands::Init { force } = &cli.command {
        return cli::init::init_command(cli.config.as_deref(), *force).await;
    }

    let config = Config::load(cli.config.as_deref())?;
    let ctx = cli::CommandContext {
        config,
        subscription: cli.subscription,
    };

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Group { command } => match command {
            GroupCommands::Create {
                name,
                location,
                tags,
            } => cli::group::create_command(&ctx, &name, location.as_deref(), &tags).await?,
            GroupCommands::List => cli::group::list_command(&ctx).await?,
        },
        Commands::Storage { command } => match command {
            StorageCommands::Create {
                name,
                group,
                sku,
                access_tier,
                tags,
            } => {
                cli::storage::create_command(
                    &ctx,
                    &name,
                    group.as_deref(),
                    sku.as_deref(),
                    access_tier.as_deref(),
                    &tags,
                )
                .await?
            }
        },
        Commands::Vm { command } => match command {
            VmCommands::Create {
                name,
                group,
                size,
                image,
                admin_user,
                admin_password,
                count,
            } => {
                cli::vm::create_command(
                    &ctx,
                    cli::vm::CreateArgs {
                        name,
                        group,
                        size,
                        image,
                        admin_user,
                        admin_password,
                        count,
                    },
                )
                .await?
            }
        },
        Commands::Container { command } => match command {
            ContainerCommands::Create {
                name,
                image,
                group,
                cpu,
                memory_gb,
                port,
            } => {
                cli::container::create_command(
                    &ctx,
                    &name,
                    &image,
                    group.as_deref(),
                    cpu,
                    memory_gb,
                    port,
                )
                .await?
            }
        },
        Commands::Users { command } => match command {
            UserCommands::Import {
                file,
                domain,
                password,
                no_password_change,
            } => {
                cli::users::import_command(
                    &ctx,
                    &file,
                    domain.as_deref(),
                    password.as_deref(),
                    no_password_change,
                )
                .await?
            }
            UserCommands::Remove { prefix, yes } => {
                cli::users::remove_command(&ctx, &prefix, yes).await?
            }
        },
        Commands::Role { command } => match command {
            RoleCommands::Create { file } => cli::role::create_command(&ctx, &file).await?,
            RoleCommands::Assign {
                role,
                principal,
                scope,
            } => cli::role::assign_command(&ctx, &role, &principal, scope.as_deref()).await?,
            RoleCommands::List { custom_only } => {
                cli::role::list_command(&ctx, custom_only).await?
            }
        },
        Commands::Inventory {
            group,
            output,
            out_file,
        } => {
            cli::inventory::inventory_command(&ctx, group.as_deref(), output, out_file.as_deref())
                .await?
        }
        Commands::Audit {
            scope,
            output,
            out_file,
        } => cli::audit::audit_command(&ctx, scope.as_deref(), output, out_file.as_deref()).await?,
        Commands::Rightsize {
            group,
            days,
            output,
            out_file,
        } => {
            cli::rightsize::rightsize_command(
                &ctx,
                group.as_deref(),
                days,
                output,
                out_file.as_deref(),
            )
            .await?
        }
        Commands::Teardown {
            prefix,
            yes,
            no_wait,
        } => cli::teardown::teardown_command(&ctx, &prefix, yes, no_wait).await?,
    }

    Ok(())
}
