//! Scan configuration
//!
//! All deployment-specific heuristics live here rather than as hard
//! constants: the unsafe-size floor, the recorder firmware split markers and
//! the GPS marker character vary between field deployments and are tunable
//! via a TOML config file or CLI flags.

use crate::error::{Result, ScanError};
use std::path::Path;

/// Configuration for a scan run
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Files at or below this size carry no trustworthy header and are
    /// classified `Unsafe` (default 0.5 MB)
    pub unsafe_floor_bytes: u64,

    /// Firmware-specific filename separators, tried in order before the
    /// plain-underscore fallback
    pub split_markers: Vec<String>,

    /// Character whose presence anywhere in a file stem marks a
    /// GPS-synchronized recording
    pub gps_marker: char,

    /// Hard cap on worker threads (0 = derive from `thread_percentage`)
    pub max_threads: usize,

    /// Percentage of available CPU cores to use for header decoding
    pub thread_percentage: u8,

    /// Overall wall-clock deadline for a scan, in seconds (None = unbounded)
    pub deadline_secs: Option<u64>,

    /// Show progress bars (suppressed automatically on non-TTY output)
    pub progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            unsafe_floor_bytes: 500_000,
            split_markers: vec!["_0+1_".to_string(), "_0_".to_string(), "_1_".to_string()],
            gps_marker: '$',
            max_threads: 0,
            thread_percentage: 75,
            deadline_secs: None,
            progress: false,
        }
    }
}

impl ScanConfig {
    /// Load configuration from a TOML file, or defaults when no path given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                if !path.exists() {
                    return Err(ScanError::NotFound(path.to_path_buf()));
                }
                let raw = std::fs::read_to_string(path)?;
                toml::from_str(&raw).map_err(|e| {
                    ScanError::InvalidArgument(format!("config {}: {e}", path.display()))
                })
            }
        }
    }

    /// Worker count for per-file header probes, bounded by the workload size
    ///
    /// Mirrors the percentage-of-cores calculation used for the walk phase:
    /// at least one worker, never more workers than files.
    pub fn worker_count(&self, candidate_count: usize) -> usize {
        let cores = num_cpus::get();
        let by_percentage = std::cmp::max(1, (cores * self.thread_percentage as usize) / 100);
        let capped = if self.max_threads > 0 {
            std::cmp::min(self.max_threads, by_percentage)
        } else {
            by_percentage
        };
        std::cmp::max(1, std::cmp::min(capped, candidate_count))
    }
}
