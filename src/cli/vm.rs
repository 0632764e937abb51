//! Virtual machine commands

use anyhow::Result;
use tracing::info;

use azlab::arm::ImageReference;
use azlab::prompt;

use super::{CommandContext, args};

pub struct CreateArgs {
    pub name: String,
    pub group: Option<String>,
    pub size: Option<String>,
    pub image: Option<String>,
    pub admin_user: Option<String>,
    pub admin_password: Option<String>,
    pub count: u32,
}

/// Create `count` VMs with their vnet/NSG/NIC plumbing.
pub async fn create_command(ctx: &CommandContext, create: CreateArgs) -> Result<()> {
    let group = ctx.resource_group(create.group.as_deref())?;
    let location = ctx.location(None);
    let size = create
        .size
        .unwrap_or_else(|| ctx.config.defaults.vm_size.clone());
    let image_spec = create
        .image
        .unwrap_or_else(|| ctx.config.defaults.vm_image.clone());
    let image = ImageReference::parse(&image_spec)?;
    let admin_user = create
        .admin_user
        .unwrap_or_else(|| ctx.config.defaults.admin_username.clone());
    let count = create.count.max(1);

    let names: Vec<String> = (1..=count)
        .map(|i| {
            if i == 1 {
                create.name.clone()
            } else {
                format!("{}-{i}", create.name)
            }
        })
        .collect();

    println!("About to create {} VM(s) in {group} ({location}):", count);
    for name in &names {
        println!("  {name}  size={size}  image={image_spec}  admin={admin_user}");
    }
    println!("Each VM gets a NIC with a public IP behind the shared lab vnet and SSH NSG.");
    if !prompt::confirm("Continue?")? {
        println!("Cancelled.");
        return Ok(());
    }

    let (password, generated) = match create.admin_password {
        Some(p) => (p, false),
        None => (args::generate_password(), true),
    };

    let client = ctx.arm()?;

    // Shared per-group network pieces first
    let subnet_id =
        client.ensure_virtual_network(&group, &format!("{group}-vnet"), &location)?;
    let nsg_id =
        client.ensure_network_security_group(&group, &format!("{group}-nsg"), &location)?;

    for name in &names {
        let pip_id = client.create_public_ip(&group, &format!("{name}-pip"), &location)?;
        let nic_id = client.create_network_interface(
            &group,
            &format!("{name}-nic"),
            &location,
            &subnet_id,
            &nsg_id,
            &pip_id,
        )?;

        let vm = client.create_vm(
            &group,
            name,
            &location,
            &size,
            &image,
            &admin_user,
            &password,
            &nic_id,
        )?;
        info!(vm = %vm.name, state = %vm.provisioning_state, "vm creation submitted");
        println!("{} [{}] {}", vm.name, vm.provisioning_state, vm.size);
    }

    if generated {
        println!("\nAdmin password (not shown again): {password}");
    }

    Ok(())
}
