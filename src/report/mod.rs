//! Report output: console tables, CSV, JSON.
//!
//! Commands build display-ready string rows and hand them here together
//! with the serializable report object (used verbatim for JSON output).

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Where a report goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns on the console
    #[default]
    Table,
    /// Comma-separated values
    Csv,
    /// Pretty-printed JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        })
    }
}

/// Render rows as aligned columns.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut out = String::new();
    for (i, header) in headers.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&format!("{:<width$}", header, width = widths[i]));
    }
    out.push('\n');
    for (i, _) in headers.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&"-".repeat(widths[i]));
    }
    out.push('\n');
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            out.push_str(&format!("{:<width$}", cell, width = widths[i]));
        }
        out.push('\n');
    }
    out
}

/// Write rows as CSV with an explicit header record.
pub fn write_csv<W: Write>(writer: W, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(headers)
        .context("Failed to write CSV header")?;
    for row in rows {
        wtr.write_record(row).context("Failed to write CSV row")?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Emit a report in the requested format.
///
/// Table always goes to the console. CSV and JSON go to `out_file` when
/// given, stdout otherwise.
pub fn emit<T: Serialize>(
    format: OutputFormat,
    out_file: Option<&Path>,
    headers: &[&str],
    rows: &[Vec<String>],
    report: &T,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            print!("{}", render_table(headers, rows));
        }
        OutputFormat::Csv => match out_file {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                write_csv(file, headers, rows)?;
                println!("Wrote {} row(s) to {}", rows.len(), path.display());
            }
            None => write_csv(io::stdout().lock(), headers, rows)?,
        },
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .context("Failed to serialize report to JSON")?;
            match out_file {
                Some(path) => {
                    std::fs::write(path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote report to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}

/// Render a tag map as `key=value` pairs joined with `;`.
pub fn format_tags(tags: &crate::domain::Tags) -> String {
    tags.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(";")
}
