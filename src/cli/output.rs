//! RecordSet rendering
//!
//! Three renderings of the same row set: an aligned text table for humans,
//! CSV for spreadsheets, JSON for machines. The header-derived columns only
//! appear when the scan ran with metadata; row count and identity are the
//! same either way.

use anyhow::Result;
use std::io::Write;

use crate::scan::{Record, RecordSet};

/// Columns always present
const NAME_COLUMNS: &[&str] = &[
    "path",
    "location",
    "timestamp",
    "year",
    "julian_day",
    "time_index",
    "gps",
    "family",
    "safety",
    "size_mb",
];

/// Columns added by a metadata scan
const HEADER_COLUMNS: &[&str] = &["sample_rate_hz", "length_s", "n_channels", "error"];

fn columns(with_metadata: bool) -> Vec<&'static str> {
    let mut cols: Vec<&str> = NAME_COLUMNS.to_vec();
    if with_metadata {
        cols.extend_from_slice(HEADER_COLUMNS);
    }
    cols
}

fn cells(record: &Record, with_metadata: bool) -> Vec<String> {
    let opt = |v: Option<String>| v.unwrap_or_default();
    let mut row = vec![
        record.path.display().to_string(),
        record.name.location.clone(),
        opt(record
            .name
            .timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())),
        opt(record.name.year.map(|y| y.to_string())),
        opt(record.name.julian_day.map(|j| j.to_string())),
        opt(record.time_index.map(|i| i.to_string())),
        record.name.gps_flag.to_string(),
        record.family.to_string(),
        record.safety.to_string(),
        format!("{:.2}", record.file_size_mb),
    ];
    if with_metadata {
        row.push(opt(record
            .header
            .map(|h| h.sample_rate_hz.to_string())));
        row.push(opt(record
            .header
            .map(|h| format!("{:.2}", h.length_seconds))));
        row.push(opt(record.header.map(|h| h.n_channels.to_string())));
        row.push(record.header_error.clone().unwrap_or_default());
    }
    row
}

/// Render as an aligned plain-text table
pub fn render_table(set: &RecordSet, out: &mut impl Write) -> Result<()> {
    let cols = columns(set.with_metadata);
    let rows: Vec<Vec<String>> = set
        .records
        .iter()
        .map(|r| cells(r, set.with_metadata))
        .collect();

    let mut widths: Vec<usize> = cols.iter().map(|c| c.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let header: Vec<String> = cols
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{c:<width$}", width = widths[i]))
        .collect();
    writeln!(out, "{}", header.join("  "))?;

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{cell:<width$}", width = widths[i]))
            .collect();
        writeln!(out, "{}", line.join("  ").trim_end())?;
    }
    Ok(())
}

/// Render as CSV with a header row
pub fn render_csv(set: &RecordSet, out: &mut impl Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(columns(set.with_metadata))?;
    for record in &set.records {
        writer.write_record(cells(record, set.with_metadata))?;
    }
    writer.flush()?;
    Ok(())
}

/// Render the full set (records, status, stats) as pretty JSON
pub fn render_json(set: &RecordSet, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, set)?;
    writeln!(out)?;
    Ok(())
}
