//! Subcommand definitions and shared scan options

pub mod filter;
pub mod scan;
pub mod stage;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::ScanConfig;
use crate::scan::{FileKind, Scanner};

#[derive(Parser)]
#[command(
    name = "pamscan",
    version,
    about = "Archive inventory for passive acoustic monitoring recordings"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan archive roots and print the inventory table
    Scan(scan::ScanArgs),
    /// Scan and split records against a known-recordings catalog export
    Filter(filter::FilterArgs),
    /// Scan and print the staging plan for an upload destination
    Stage(stage::StageArgs),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config_path = self.config.as_deref();
        match self.command {
            Commands::Scan(args) => scan::execute(args, config_path),
            Commands::Filter(args) => filter::execute(args, config_path),
            Commands::Stage(args) => stage::execute(args, config_path),
        }
    }
}

/// Options shared by every scanning subcommand
#[derive(Args)]
pub struct ScanOpts {
    /// Archive roots to scan (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Container family to include
    #[arg(long, value_enum, default_value = "all")]
    pub file_type: FileKind,

    /// IANA timezone the filename timestamps are recorded in
    #[arg(long, value_name = "ZONE")]
    pub timezone: Option<String>,

    /// Size floor in bytes below which files are classified unsafe
    #[arg(long, value_name = "BYTES")]
    pub size_floor: Option<u64>,

    /// Hard cap on decode worker threads
    #[arg(long)]
    pub threads: Option<usize>,

    /// Abort remaining header reads after this many seconds
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,

    /// Show progress bars
    #[arg(long)]
    pub progress: bool,
}

impl ScanOpts {
    /// Load the config file (or defaults) and apply CLI overrides
    pub fn build_scanner(&self, config_path: Option<&Path>) -> Result<Scanner> {
        let mut config = ScanConfig::load(config_path).context("loading configuration")?;
        if let Some(floor) = self.size_floor {
            config.unsafe_floor_bytes = floor;
        }
        if let Some(threads) = self.threads {
            config.max_threads = threads;
        }
        if let Some(deadline) = self.deadline {
            config.deadline_secs = Some(deadline);
        }
        if self.progress {
            config.progress = true;
        }
        Ok(Scanner::new(config))
    }

    pub fn roots(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.paths.clone()
        }
    }
}

/// Output format for rendered tables
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    Table,
    /// CSV with a header row
    Csv,
    /// Pretty JSON including status and stats
    Json,
}
