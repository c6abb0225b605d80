//! # pamscan - archive inventory for passive acoustic monitoring
//!
//! pamscan recursively scans a mounted archive volume for field-recorder
//! audio files (`.wav`, `.wac`, `.flac`), extracts structured metadata from
//! filenames and binary file headers, and emits one normalized table
//! describing the archive's contents:
//!
//! - **Tolerant filename parsing**: location, timestamp, julian day and GPS
//!   flag recovered across inconsistent recorder firmware conventions
//! - **Per-family header decoding**: native WAV fields, a byte-exact decoder
//!   for the proprietary WAC header, and FLAC stream probing
//! - **Partial-failure tolerance**: undersized and undecodable files stay in
//!   the output with null metadata instead of being dropped
//! - **Bounded parallelism**: per-file header probes fan out over a fixed
//!   worker pool with deterministic output ordering
//!
//! ## Library usage
//!
//! ```rust,no_run
//! use pamscan::{ScanConfig, Scanner};
//! use pamscan::scan::FileKind;
//! use std::path::PathBuf;
//!
//! let scanner = Scanner::new(ScanConfig::default());
//! let set = scanner.scan(
//!     &[PathBuf::from("/mnt/archive")],
//!     FileKind::All,
//!     true,
//!     Some("US/Eastern"),
//! )?;
//! for record in &set.records {
//!     println!("{} -> {:?}", record.path.display(), record.time_index);
//! }
//! # Ok::<(), pamscan::ScanError>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod scan;
pub mod stage;

pub use config::ScanConfig;
pub use error::{Result, ScanError};
pub use scan::{Record, RecordSet, Scanner};
