//! Error taxonomy for the scan pipeline
//!
//! Fatal errors (`InvalidArgument`, `NotFound`, `EmptyResult`) abort a scan
//! and surface to the caller. `InvalidFormat` is fatal only when a decoder is
//! invoked directly with the wrong file type. Per-file decode failures are
//! never fatal inside a scan: the orchestrator catches them and records an
//! error marker on the affected record instead.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug, Error)]
pub enum ScanError {
    /// Bad selector, timezone or other caller-supplied value
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A scan root does not exist
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A family-specific decoder was handed a file with the wrong extension
    #[error("invalid format: {} is not a .{expected} file", path.display())]
    InvalidFormat {
        expected: &'static str,
        path: PathBuf,
    },

    /// The scan matched zero candidate files
    #[error("scan matched no candidate files")]
    EmptyResult,

    /// A header could not be decoded from an individual file
    #[error("decode failure in {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// Malformed known-recordings catalog input
    #[error("catalog: {0}")]
    Catalog(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("internal: {0}")]
    Internal(String),
}
