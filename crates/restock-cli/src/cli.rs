//! CLI argument definitions for the restock planner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use restock_report::DEFAULT_PAGE_SIZE;

#[derive(Parser)]
#[command(
    name = "restock",
    version,
    about = "Restock Planner - send/recall decisions from inventory CSV exports",
    long_about = "Compute per-SKU send/recall decisions for every fulfillment center.\n\n\
                  Takes the marketplace sale export, the fulfillment-center snapshot,\n\
                  and the central-warehouse stock export, joined through the SKU\n\
                  cross-reference at data/sku_mapping.csv."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the restocking plan from the four source exports.
    Plan(PlanArgs),

    /// List the required headers for each source export.
    Schemas,
}

#[derive(Parser)]
pub struct PlanArgs {
    /// Path to the marketplace sale transactions CSV.
    #[arg(long = "sale", value_name = "PATH")]
    pub sale: PathBuf,

    /// Path to the fulfillment-center inventory snapshot CSV.
    #[arg(long = "fc", value_name = "PATH")]
    pub fc_snapshot: PathBuf,

    /// Path to the central-warehouse stock CSV.
    #[arg(long = "central", value_name = "PATH")]
    pub central: PathBuf,

    /// Base directory containing the SKU cross-reference at
    /// data/sku_mapping.csv.
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Decision policy TOML profile; built-in thresholds apply when omitted.
    #[arg(long = "policy", value_name = "PATH")]
    pub policy: Option<PathBuf>,

    /// Rows per rendered table page.
    #[arg(long = "page-size", value_name = "N", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Write the full record set as CSV to this path.
    #[arg(long = "csv-out", value_name = "PATH")]
    pub csv_out: Option<PathBuf>,

    /// Write the full record set as JSON to this path.
    #[arg(long = "json-out", value_name = "PATH")]
    pub json_out: Option<PathBuf>,

    /// Print the pipeline event log after the summary.
    #[arg(long = "show-events")]
    pub show_events: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
