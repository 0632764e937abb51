//! Right-sizing command

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use azlab::domain::VmUtilization;
use azlab::report::{self, OutputFormat};
use azlab::rightsize::{self, RightsizeRow};

use super::CommandContext;

#[derive(Serialize)]
struct RightsizeReport<'a> {
    lookback_days: u32,
    rows: &'a [RightsizeRow],
}

/// Fetch CPU utilization for the lab VMs and emit recommendations.
pub async fn rightsize_command(
    ctx: &CommandContext,
    group: Option<&str>,
    days: u32,
    output: OutputFormat,
    out_file: Option<&Path>,
) -> Result<()> {
    let client = ctx.arm()?;
    let vms = client.list_vms(group)?;

    if vms.is_empty() {
        println!("No VMs found.");
        return Ok(());
    }

    let mut measurements = Vec::with_capacity(vms.len());
    for vm in &vms {
        // A metrics failure on one VM should not sink the whole report
        let utilization = match client.fetch_cpu_utilization(vm, days) {
            Ok(utilization) => utilization,
            Err(err) => {
                warn!(vm = %vm.name, error = %err, "metrics fetch failed");
                eprintln!("Warning: no metrics for {}: {err}", vm.name);
                VmUtilization::empty(&vm.name)
            }
        };
        measurements.push((vm.name.clone(), vm.size.clone(), utilization));
    }

    let rows = rightsize::build_rows(&measurements);

    let display_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.vm_name.clone(),
                r.current_size.clone(),
                format!("{:.1}", r.avg_cpu_percent),
                format!("{:.1}", r.max_cpu_percent),
                r.recommendation.label(),
                r.note.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let rightsize_report = RightsizeReport {
        lookback_days: days,
        rows: &rows,
    };

    report::emit(
        output,
        out_file,
        &["vm", "size", "avg cpu %", "max cpu %", "recommendation", "note"],
        &display_rows,
        &rightsize_report,
    )?;

    Ok(())
}
