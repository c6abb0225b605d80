//! Record assembly, per-family partitioning and sequence indexing
//!
//! The merger owns the invariant that exactly one [`Record`] exists per
//! enumerated candidate: the Safe set is split by container family and each
//! partition decoded independently, then everything (including the untouched
//! Unsafe partition) is reassembled in enumeration order before `time_index`
//! assignment.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::scan::classify::{ContainerFamily, SafetyClass};
use crate::scan::filename::ParsedName;
use crate::scan::header::HeaderInfo;

/// One output row per input file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub path: PathBuf,
    #[serde(flatten)]
    pub name: ParsedName,
    pub safety: SafetyClass,
    pub file_size_mb: f64,
    pub family: ContainerFamily,
    /// Present only when the file was Safe and its header decoded
    pub header: Option<HeaderInfo>,
    /// Error marker for per-file decode failures (scan continues past them)
    pub header_error: Option<String>,
    /// 1-based ordinal within the (location, year, julian_day) group,
    /// ascending by timestamp
    pub time_index: Option<u32>,
}

/// Completion state of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ScanStatus {
    Complete,
    /// The cancel signal or deadline fired; completed per-file results are
    /// preserved
    Partial { completed: usize, total: usize },
}

/// Aggregate counters for one scan invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub files_discovered: usize,
    pub unsafe_files: usize,
    pub decode_attempted: usize,
    pub decoded: usize,
    pub decode_failures: usize,
    pub duration_ms: u64,
}

/// The normalized inventory table
#[derive(Debug, Clone, Serialize)]
pub struct RecordSet {
    pub records: Vec<Record>,
    pub status: ScanStatus,
    pub with_metadata: bool,
    pub stats: ScanStats,
}

impl RecordSet {
    pub fn is_partial(&self) -> bool {
        matches!(self.status, ScanStatus::Partial { .. })
    }
}

/// Indices of Safe, decodable records grouped by family
///
/// Each partition is decoded independently so one family's failures never
/// block another family's progress; the indices let results scatter back to
/// their enumeration positions.
pub fn partition_by_family(records: &[Record]) -> BTreeMap<ContainerFamily, Vec<usize>> {
    let mut partitions: BTreeMap<ContainerFamily, Vec<usize>> = BTreeMap::new();
    for (idx, record) in records.iter().enumerate() {
        if record.safety == SafetyClass::Safe && record.family != ContainerFamily::Unrecognized {
            partitions.entry(record.family).or_default().push(idx);
        }
    }
    partitions
}

/// Assign `time_index` over (location, year, julian_day) groups
///
/// Within a group, indices are 1-based, ascending by timestamp; identical
/// timestamps keep their enumeration order (stable sort over an already
/// path-sorted slice). Records with a null timestamp have no group and keep
/// `time_index = None`.
pub fn assign_time_index(records: &mut [Record]) {
    let mut groups: BTreeMap<(String, i32, u32), Vec<usize>> = BTreeMap::new();
    for (idx, record) in records.iter().enumerate() {
        if let (Some(_), Some(year), Some(julian)) =
            (record.name.timestamp, record.name.year, record.name.julian_day)
        {
            groups
                .entry((record.name.location.clone(), year, julian))
                .or_default()
                .push(idx);
        }
    }

    for indices in groups.values_mut() {
        indices.sort_by_key(|&idx| records[idx].name.timestamp);
        for (ordinal, &idx) in indices.iter().enumerate() {
            records[idx].time_index = Some(ordinal as u32 + 1);
        }
    }
}
