//! `pamscan stage` - list the source paths to stage for upload

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use super::{OutputFormat, ScanOpts};
use crate::catalog::KnownRecordings;
use crate::stage::StagingPlan;

#[derive(Args)]
pub struct StageArgs {
    #[command(flatten)]
    pub opts: ScanOpts,

    /// Destination directory the files would be staged into
    #[arg(long, value_name = "DIR")]
    pub dest: PathBuf,

    /// Only stage recordings absent from this catalog export
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Output format (table prints one source path per line)
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

pub fn execute(args: StageArgs, config_path: Option<&Path>) -> Result<()> {
    let scanner = args.opts.build_scanner(config_path)?;
    let set = scanner.scan(
        &args.opts.roots(),
        args.opts.file_type,
        false,
        args.opts.timezone.as_deref(),
    )?;

    let plan = match &args.catalog {
        Some(catalog_path) => {
            let known = KnownRecordings::from_csv_path(catalog_path)?;
            let (_, new) = known.partition(&set.records);
            StagingPlan::for_records(new.into_iter(), &args.dest)
        }
        None => StagingPlan::for_records(set.records.iter(), &args.dest),
    };
    tracing::info!(
        sources = plan.len(),
        dest = %plan.destination.display(),
        "staging plan built"
    );

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        // Table and CSV are the same one-path-per-line listing here
        OutputFormat::Table | OutputFormat::Csv => {
            for source in &plan.sources {
                println!("{}", source.display());
            }
        }
    }
    Ok(())
}
