use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use gmix_core::RegionSelection;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generation-mix simulation reports", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarise a run: demand, surplus and unserved energy
    Report(ReportArgs),
    /// Print the fleet as JSON records
    Fleet(RunArgs),
}

/// Inputs shared by every command that builds a context.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Hourly demand (CSV or Parquet); the first column is the timestamp
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub demand: PathBuf,

    /// Configuration file (defaults to $GMIX_CONFIG, then built-in values)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Fleet as comma-separated TECH[@POLYGON] entries, e.g. `wind@4,ccgt`
    #[arg(long, value_delimiter = ',')]
    pub fleet: Vec<String>,

    /// One value per tunable parameter, in fleet order
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub capacities: Vec<f64>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Restrict the run to these regions, e.g. `NSW1,VIC1`
    #[arg(long)]
    pub regions: Option<RegionSelection>,

    /// Spill table from dispatch
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub spill: Option<PathBuf>,

    /// Generation table from dispatch, one column per generator label
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub generation: Option<PathBuf>,

    /// Unserved energy table from dispatch
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub unserved: Option<PathBuf>,

    /// Include per-generator lines in the report
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Plain)]
    pub format: ReportFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable text
    Plain,
    /// Run metrics as JSON
    Json,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
