//! CLI Commands
//!
//! One function per subcommand. Errors surface as `anyhow` with context;
//! everything below this layer uses typed errors.

use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use console::style;

use crate::logic::config::PipelineConfig;
use crate::logic::history;
use crate::logic::scan::{run_scan, scan_gate};
use crate::logic::workbook::{generate_records, write_workbook, GeneratorConfig};
use super::{dashboard, terminal};

/// Terminal mode: one scan, printed once
pub fn scan(config: &PipelineConfig, json: bool) -> Result<()> {
    let report = run_scan(config, scan_gate())
        .with_context(|| format!("scan of {} failed", config.workbook_path.display()))?;

    if json {
        println!("{}", terminal::render_json(&report).context("cannot serialize scan report")?);
    } else {
        println!("{}", style(terminal::summary_line(&report)).dim());
        println!();
        println!("{}", terminal::render_report(&report));
    }
    Ok(())
}

/// Interactive mode
pub fn dashboard(config: PipelineConfig) -> Result<()> {
    dashboard::run(config).context("dashboard terminal error")
}

/// Write a synthetic workbook
pub fn generate(output: &Path, seed: Option<u64>, equipment: u32) -> Result<()> {
    let records = generate_records(&GeneratorConfig {
        equipment_count: equipment,
        seed,
        ..Default::default()
    });
    write_workbook(&records, output)
        .with_context(|| format!("cannot generate workbook at {}", output.display()))?;

    println!(
        "Wrote {} ({} operational, {} maintenance, {} occurrence rows)",
        output.display(),
        records.operational.len(),
        records.maintenance.len(),
        records.occurrences.len()
    );
    Ok(())
}

fn history_dir(config: &PipelineConfig) -> PathBuf {
    config.history_dir.clone().unwrap_or_else(history::default_history_dir)
}

pub fn history_export(config: &PipelineConfig, target: &Path) -> Result<()> {
    let dir = history_dir(config);
    let files = history::to_jsonl(&dir, target)
        .with_context(|| format!("cannot export history from {}", dir.display()))?;
    println!("Exported {} history file(s) to {}", files, target.display());
    Ok(())
}

pub fn history_stats(config: &PipelineConfig) -> Result<()> {
    let dir = history_dir(config);
    let stats = history::stats(&dir).with_context(|| format!("cannot read history in {}", dir.display()))?;

    println!("History directory: {}", dir.display());
    println!("Files:             {}", stats.total_files);
    println!("Size:              {:.2} MB", stats.total_size_mb);
    println!("Current file:      {}", stats.current_file);
    println!("Scans recorded:    {}", stats.total_scans);
    println!("Current layout:    {}", stats.current_layout_scans);
    match stats.last_scan {
        Some(ts) => println!("Last scan:         {}", ts.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("Last scan:         never"),
    }
    Ok(())
}
