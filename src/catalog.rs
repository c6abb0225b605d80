//! Known-recordings boundary
//!
//! The remote catalog is consumed only as a tabular export of
//! `{location, timestamp}` pairs. Matching is by a derived join key of the
//! form `location_YYYYMMDD_HHMMSS`, the same shape the filename parser
//! recovers from disk, so a scan can be partitioned into recordings the
//! catalog already knows about and new ones.

use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, ScanError};
use crate::scan::Record;

/// Timestamp shapes accepted in catalog exports
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y%m%d_%H%M%S",
];

/// The set of recordings a remote catalog already holds
#[derive(Debug, Clone, Default)]
pub struct KnownRecordings {
    keys: HashSet<String>,
}

impl KnownRecordings {
    /// Load a CSV export with `location` and `timestamp` columns
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScanError::NotFound(path.to_path_buf()));
        }
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| ScanError::Catalog(format!("{}: {e}", path.display())))?;

        let headers = reader
            .headers()
            .map_err(|e| ScanError::Catalog(e.to_string()))?
            .clone();
        let location_col = column_index(&headers, "location")?;
        let timestamp_col = column_index(&headers, "timestamp")?;

        let mut keys = HashSet::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| ScanError::Catalog(e.to_string()))?;
            let location = record.get(location_col).unwrap_or_default().trim();
            let raw_ts = record.get(timestamp_col).unwrap_or_default().trim();
            let timestamp = parse_catalog_timestamp(raw_ts).ok_or_else(|| {
                ScanError::Catalog(format!("row {}: unparseable timestamp '{raw_ts}'", row + 2))
            })?;
            keys.insert(join_key(location, timestamp));
        }

        tracing::debug!(known = keys.len(), "loaded catalog export");
        Ok(Self { keys })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Is this record already present in the catalog?
    ///
    /// Records without a parsed timestamp never match; they always land in
    /// the "new" partition so nothing is silently dropped.
    pub fn contains(&self, record: &Record) -> bool {
        match record.name.timestamp {
            Some(ts) => self.keys.contains(&join_key(&record.name.location, ts)),
            None => false,
        }
    }

    /// Split records into (known, new), preserving order
    pub fn partition<'a>(&self, records: &'a [Record]) -> (Vec<&'a Record>, Vec<&'a Record>) {
        records.iter().partition(|record| self.contains(record))
    }
}

/// Derive the `location_YYYYMMDD_HHMMSS` join key
pub fn join_key(location: &str, timestamp: NaiveDateTime) -> String {
    format!("{location}_{}", timestamp.format("%Y%m%d_%H%M%S"))
}

fn parse_catalog_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| ScanError::Catalog(format!("missing required column '{name}'")))
}
