//! Tolerant filename parsing
//!
//! Field recorders name files `<location><sep><YYYYMMDD>_<HHMMSS>` where the
//! separator varies by firmware: Song-Meter-style channel markers (`_0+1_`,
//! `_0_`, `_1_`) or a plain underscore. The markers are tried in priority
//! order before the underscore fallback, so adding a new firmware convention
//! is a pure data change to [`crate::config::ScanConfig::split_markers`].
//!
//! A stem whose date segment does not parse still yields a usable
//! [`ParsedName`] with null timestamp fields; downstream code tolerates that
//! rather than treating it as an error.

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

const COMPACT_DATETIME: &str = "%Y%m%d_%H%M%S";

/// Fields extracted from one file stem
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedName {
    pub raw_stem: String,
    pub location: String,
    pub timestamp_raw: String,
    /// Recorder wall-clock time, if the date segment parsed
    pub timestamp: Option<NaiveDateTime>,
    /// The wall-clock time interpreted in the requested zone, if any
    pub timestamp_utc: Option<DateTime<Utc>>,
    /// Day-of-year ordinal (1-366)
    pub julian_day: Option<u32>,
    pub year: Option<i32>,
    pub gps_flag: bool,
}

/// Parse a file stem into its location/timestamp parts
///
/// `markers` is the ordered list of firmware separators; `gps_marker` flags
/// GPS-synchronized recordings by presence anywhere in the stem; `zone` is
/// the optional target zone for the derived UTC instant.
pub fn parse_stem(
    stem: &str,
    markers: &[String],
    gps_marker: char,
    zone: Option<Tz>,
) -> ParsedName {
    let gps_flag = stem.contains(gps_marker);

    let (location, remainder) = split_location(stem, markers);
    let timestamp_raw = strip_leading_marker(remainder, markers).to_string();

    let timestamp = NaiveDateTime::parse_from_str(&timestamp_raw, COMPACT_DATETIME).ok();
    if timestamp.is_none() && !timestamp_raw.is_empty() {
        tracing::debug!(stem, "date segment '{timestamp_raw}' did not parse");
    }

    let timestamp_utc = match (timestamp, zone) {
        (Some(ts), Some(tz)) => ts
            .and_local_timezone(tz)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    };

    ParsedName {
        raw_stem: stem.to_string(),
        location: location.to_string(),
        timestamp_raw,
        timestamp,
        timestamp_utc,
        julian_day: timestamp.map(|ts| ts.ordinal()),
        year: timestamp.map(|ts| ts.year()),
        gps_flag,
    }
}

/// Split off the location using the first matching marker, falling back to
/// the first plain underscore. A stem with no separator at all is treated as
/// a bare location.
fn split_location<'a>(stem: &'a str, markers: &[String]) -> (&'a str, &'a str) {
    for marker in markers {
        if let Some((location, rest)) = stem.split_once(marker.as_str()) {
            return (location, rest);
        }
    }
    match stem.split_once('_') {
        Some((location, rest)) => (location, rest),
        None => (stem, ""),
    }
}

/// Drop a redundant channel marker left at the head of the date segment
/// (seen when the marker list did not cover a firmware's variant and the
/// underscore fallback split inside the marker).
fn strip_leading_marker<'a>(remainder: &'a str, markers: &[String]) -> &'a str {
    for marker in markers {
        let bare = marker.trim_matches('_');
        if bare.is_empty() {
            continue;
        }
        if let Some(rest) = remainder.strip_prefix(bare) {
            if let Some(rest) = rest.strip_prefix('_') {
                return rest;
            }
        }
    }
    remainder
}
