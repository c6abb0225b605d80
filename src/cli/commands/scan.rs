//! `pamscan scan` - inventory an archive

use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::{OutputFormat, ScanOpts};
use crate::cli::output;
use crate::scan::ScanStatus;

#[derive(Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub opts: ScanOpts,

    /// Read binary headers (duration, sample rate, channels) in addition to
    /// filename metadata
    #[arg(long)]
    pub metadata: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

pub fn execute(args: ScanArgs, config_path: Option<&Path>) -> Result<()> {
    let scanner = args.opts.build_scanner(config_path)?;
    let set = scanner.scan(
        &args.opts.roots(),
        args.opts.file_type,
        args.metadata,
        args.opts.timezone.as_deref(),
    )?;

    if let ScanStatus::Partial { completed, total } = set.status {
        tracing::warn!("partial scan: {completed}/{total} headers read before cancellation");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Table => output::render_table(&set, &mut out)?,
        OutputFormat::Csv => output::render_csv(&set, &mut out)?,
        OutputFormat::Json => output::render_json(&set, &mut out)?,
    }
    Ok(())
}
