//! # CLI Module
//!
//! Command-line interface for the capacity and compliance report.
//!
//! Commands:
//! - `report`: load a snapshot, build the report, write text or JSON
//! - `check`: decode and validate a snapshot without rendering
//!
//! A snapshot file that cannot be read is not fatal: the run continues with
//! an empty snapshot and the report shows zero assets. A snapshot that can be
//! read but not decoded aborts the run.

use clap::{Args, Parser, Subcommand};
use dcim_core::config::{
    DEFAULT_CRITICAL_VENDORS, DEFAULT_EOL_AGE_YEARS, DEFAULT_MAX_RACK_POWER_KVA,
    DEFAULT_MAX_RACK_UNITS,
};
use dcim_core::formats::parse_assets_json;
use dcim_core::{Asset, CapacityReport, ReportConfig};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Snapshot read when `--input` is not given.
pub const DEFAULT_INPUT: &str = "dcim_data.json";

// =============================================================================
// ERRORS
// =============================================================================

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The engine rejected the snapshot or the configuration.
    #[error(transparent)]
    Core(#[from] dcim_core::Error),

    /// Writing the report failed.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding of the report failed.
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// ARGUMENTS
// =============================================================================

/// Data-center capacity and compliance report.
#[derive(Debug, Parser)]
#[command(name = "dcim-report", version, about)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the capacity and compliance report.
    Report {
        /// Asset snapshot (JSON array of records).
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Emit the report as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Write the report to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Validate a snapshot without rendering a report.
    Check {
        /// Asset snapshot (JSON array of records).
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,
    },
}

/// Capacity limits and compliance thresholds.
#[derive(Debug, Clone, Args)]
pub struct LimitArgs {
    /// Usable rack units per rack.
    #[arg(long, default_value_t = DEFAULT_MAX_RACK_UNITS)]
    pub max_rack_units: u32,

    /// Power budget per rack in kVA.
    #[arg(long, default_value_t = DEFAULT_MAX_RACK_POWER_KVA)]
    pub max_rack_power_kva: f64,

    /// Age in years at which an asset is flagged as end-of-life.
    #[arg(long, default_value_t = DEFAULT_EOL_AGE_YEARS)]
    pub eol_age_years: f64,

    /// Critical vendor name; repeat for several. Defaults to HP and EMC.
    #[arg(long = "critical-vendor", value_name = "VENDOR")]
    pub critical_vendors: Vec<String>,
}

impl LimitArgs {
    /// Build the report configuration from the flags.
    #[must_use]
    pub fn to_config(&self) -> ReportConfig {
        let config = ReportConfig::new()
            .with_max_rack_units(self.max_rack_units)
            .with_max_rack_power_kva(self.max_rack_power_kva)
            .with_eol_age_years(self.eol_age_years);

        if self.critical_vendors.is_empty() {
            config.with_critical_vendors(DEFAULT_CRITICAL_VENDORS)
        } else {
            config.with_critical_vendors(self.critical_vendors.iter().cloned())
        }
    }
}

// =============================================================================
// SNAPSHOT LOADING
// =============================================================================

/// Load a snapshot file.
///
/// An unreadable file yields an empty snapshot. Decoding errors propagate.
pub fn load_assets(path: &Path) -> Result<Vec<Asset>, CliError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "snapshot unavailable, continuing with zero assets"
            );
            return Ok(Vec::new());
        }
    };

    let assets = parse_assets_json(&content)?;
    info!(path = %path.display(), assets = assets.len(), "snapshot loaded");
    Ok(assets)
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Build the report for a snapshot file.
pub fn build_report(input: &Path, config: &ReportConfig) -> Result<CapacityReport, CliError> {
    let assets = load_assets(input)?;
    let report = CapacityReport::build(&assets, config)?;

    let over_capacity = report.capacity.over_capacity().count();
    if over_capacity > 0 {
        warn!(racks = over_capacity, "racks above their space or power limit");
    }
    Ok(report)
}

/// Render a report as text or pretty JSON.
pub fn render_output(report: &CapacityReport, json: bool) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(report.to_text())
    }
}

/// Build, render, and emit the report.
pub fn cmd_report(
    input: &Path,
    config: &ReportConfig,
    json: bool,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let report = build_report(input, config)?;
    let rendered = render_output(&report, json)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", rendered)).map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Result of validating a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSummary {
    pub assets: usize,
    pub racks: usize,
    pub online: usize,
}

/// Decode and validate a snapshot, printing a one-line summary.
pub fn cmd_check(input: &Path) -> Result<CheckSummary, CliError> {
    let assets = load_assets(input)?;

    let racks: BTreeSet<&str> = assets.iter().map(|a| a.rack_id.as_str()).collect();

    let summary = CheckSummary {
        assets: assets.len(),
        racks: racks.len(),
        online: assets.iter().filter(|a| a.status.is_online()).count(),
    };
    println!(
        "{}: {} assets ({} online) across {} racks",
        input.display(),
        summary.assets,
        summary.online,
        summary.racks
    );
    Ok(summary)
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Report {
            input,
            json,
            output,
            limits,
        } => cmd_report(&input, &limits.to_config(), json, output.as_deref()),
        Command::Check { input } => cmd_check(&input).map(|_| ()),
    }
}
