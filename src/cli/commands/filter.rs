//! `pamscan filter` - split a scan against a catalog export

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use super::{OutputFormat, ScanOpts};
use crate::catalog::KnownRecordings;
use crate::cli::output;
use crate::scan::RecordSet;

#[derive(Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub opts: ScanOpts,

    /// CSV export of the remote catalog (columns: location, timestamp)
    #[arg(long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Show recordings the catalog already knows about instead of new ones
    #[arg(long)]
    pub known: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

pub fn execute(args: FilterArgs, config_path: Option<&Path>) -> Result<()> {
    let known_set = KnownRecordings::from_csv_path(&args.catalog)?;
    tracing::info!(known = known_set.len(), "catalog loaded");

    let scanner = args.opts.build_scanner(config_path)?;
    // Filtering is by join key only, so the cheap name-only scan suffices
    let set = scanner.scan(
        &args.opts.roots(),
        args.opts.file_type,
        false,
        args.opts.timezone.as_deref(),
    )?;

    let (known, new) = known_set.partition(&set.records);
    tracing::info!(known = known.len(), new = new.len(), "records partitioned");

    let selected = if args.known { known } else { new };
    let filtered = RecordSet {
        records: selected.into_iter().cloned().collect(),
        status: set.status,
        with_metadata: set.with_metadata,
        stats: set.stats,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Table => output::render_table(&filtered, &mut out)?,
        OutputFormat::Csv => output::render_csv(&filtered, &mut out)?,
        OutputFormat::Json => output::render_json(&filtered, &mut out)?,
    }
    Ok(())
}
