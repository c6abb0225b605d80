//! Scan orchestrator
//!
//! Drives the pipeline: enumerate candidates, classify sizes, parse
//! filenames, then (when metadata is requested) fan header decoding out over
//! a bounded worker pool and merge everything back into one [`RecordSet`].
//! This is the only component with a concurrency policy; each scan call is
//! self-contained and only reads the filesystem.

use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use chrono_tz::Tz;

use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::scan::classify::{FileKind, SafetyClass};
use crate::scan::enumerate::{FileCandidate, enumerate};
use crate::scan::filename::parse_stem;
use crate::scan::header::{HeaderInfo, decode_header};
use crate::scan::merge::{
    Record, RecordSet, ScanStats, ScanStatus, assign_time_index, partition_by_family,
};
use crate::scan::progress::ProgressTracker;

/// Outcome of one per-file header probe
enum DecodeOutcome {
    Decoded(HeaderInfo),
    Failed(String),
    /// The cancel signal or deadline fired before this file was reached
    Cancelled,
}

/// Public entry point for archive scans
pub struct Scanner {
    config: Arc<ScanConfig>,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan `roots` and produce the normalized inventory table
    ///
    /// `timezone` is an optional IANA zone name the filename wall-clock
    /// times are interpreted in; a bad name fails with `InvalidArgument`
    /// before any I/O. With `with_metadata = false` the scan skips all
    /// binary header I/O; the row set is identical either way.
    pub fn scan(
        &self,
        roots: &[PathBuf],
        file_type: FileKind,
        with_metadata: bool,
        timezone: Option<&str>,
    ) -> Result<RecordSet> {
        self.scan_with_cancel(roots, file_type, with_metadata, timezone, None)
    }

    /// Like [`Scanner::scan`], with an external cancel signal
    ///
    /// When the flag is raised mid-scan, already-completed per-file results
    /// are preserved and the set-level status is [`ScanStatus::Partial`]
    /// rather than an error.
    pub fn scan_with_cancel(
        &self,
        roots: &[PathBuf],
        file_type: FileKind,
        with_metadata: bool,
        timezone: Option<&str>,
        cancel: Option<&AtomicBool>,
    ) -> Result<RecordSet> {
        let start = Instant::now();
        let zone = parse_zone(timezone)?;

        let progress = ProgressTracker::new(self.config.progress);
        progress.start_discovery();
        let candidates = enumerate(roots, file_type)?;
        if candidates.is_empty() {
            return Err(ScanError::EmptyResult);
        }
        progress.finish_discovery(candidates.len());

        let mut records: Vec<Record> = candidates
            .iter()
            .map(|candidate| self.base_record(candidate, zone))
            .collect();

        let mut stats = ScanStats {
            files_discovered: candidates.len(),
            unsafe_files: records
                .iter()
                .filter(|r| r.safety == SafetyClass::Unsafe)
                .count(),
            ..ScanStats::default()
        };

        let status = if with_metadata {
            self.decode_headers(&mut records, &progress, cancel, &mut stats)?
        } else {
            ScanStatus::Complete
        };
        progress.finish();

        assign_time_index(&mut records);

        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            files = stats.files_discovered,
            unsafe_files = stats.unsafe_files,
            decoded = stats.decoded,
            failures = stats.decode_failures,
            elapsed_ms = stats.duration_ms,
            partial = matches!(status, ScanStatus::Partial { .. }),
            "scan finished"
        );

        Ok(RecordSet {
            records,
            status,
            with_metadata,
            stats,
        })
    }

    /// Assemble the name-only record for one candidate
    fn base_record(&self, candidate: &FileCandidate, zone: Option<Tz>) -> Record {
        let stem = candidate
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let name = parse_stem(
            stem,
            &self.config.split_markers,
            self.config.gps_marker,
            zone,
        );

        Record {
            path: candidate.path.clone(),
            name,
            safety: SafetyClass::from_size(candidate.size_bytes, self.config.unsafe_floor_bytes),
            file_size_mb: candidate.size_bytes as f64 / 1_000_000.0,
            family: candidate.family,
            header: None,
            header_error: None,
            time_index: None,
        }
    }

    /// Decode headers for the Safe set, one family partition at a time
    ///
    /// Workers share no mutable state: each produces an outcome keyed by the
    /// record's enumeration position, and outcomes are scattered back after
    /// the parallel section so ordering never depends on scheduling.
    fn decode_headers(
        &self,
        records: &mut [Record],
        progress: &ProgressTracker,
        cancel: Option<&AtomicBool>,
        stats: &mut ScanStats,
    ) -> Result<ScanStatus> {
        let partitions = partition_by_family(records);
        let total: usize = partitions.values().map(Vec::len).sum();
        stats.decode_attempted = total;
        if total == 0 {
            return Ok(ScanStatus::Complete);
        }

        progress.start_decoding(total);
        let deadline = self
            .config
            .deadline_secs
            .map(|secs| Instant::now() + Duration::from_secs(secs));

        let workers = self.config.worker_count(total);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| ScanError::Internal(format!("worker pool: {e}")))?;
        tracing::debug!(workers, total, "decoding headers");

        let mut any_cancelled = false;
        for (family, indices) in &partitions {
            let work: Vec<(usize, PathBuf)> = indices
                .iter()
                .map(|&idx| (idx, records[idx].path.clone()))
                .collect();

            let outcomes: Vec<(usize, DecodeOutcome)> = pool.install(|| {
                work.par_iter()
                    .map(|(idx, path)| {
                        if is_cancelled(cancel, deadline) {
                            return (*idx, DecodeOutcome::Cancelled);
                        }
                        let outcome = match decode_header(*family, path) {
                            Ok(info) => DecodeOutcome::Decoded(info),
                            Err(err) => {
                                tracing::warn!("{err}");
                                DecodeOutcome::Failed(err.to_string())
                            }
                        };
                        progress.increment_completed();
                        (*idx, outcome)
                    })
                    .collect()
            });

            for (idx, outcome) in outcomes {
                match outcome {
                    DecodeOutcome::Decoded(info) => {
                        stats.decoded += 1;
                        records[idx].header = Some(info);
                    }
                    DecodeOutcome::Failed(reason) => {
                        stats.decode_failures += 1;
                        records[idx].header_error = Some(reason);
                    }
                    DecodeOutcome::Cancelled => {
                        any_cancelled = true;
                        records[idx].header_error = Some("cancelled before decode".to_string());
                    }
                }
            }
        }

        if any_cancelled || is_cancelled(cancel, deadline) {
            Ok(ScanStatus::Partial {
                completed: progress.completed(),
                total,
            })
        } else {
            Ok(ScanStatus::Complete)
        }
    }
}

fn parse_zone(timezone: Option<&str>) -> Result<Option<Tz>> {
    match timezone {
        None => Ok(None),
        Some(name) => name
            .parse::<Tz>()
            .map(Some)
            .map_err(|_| ScanError::InvalidArgument(format!("unknown timezone '{name}'"))),
    }
}

fn is_cancelled(cancel: Option<&AtomicBool>, deadline: Option<Instant>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
        || deadline.is_some_and(|at| Instant::now() >= at)
}
