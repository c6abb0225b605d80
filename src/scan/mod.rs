//! Archive scanning pipeline
//!
//! Data flows strictly downward: enumeration, size classification, filename
//! parsing and per-family header decoding, merged into one [`RecordSet`].
//! [`Scanner`] wraps the whole pipeline and owns the concurrency policy.

pub mod classify;
pub mod enumerate;
pub mod filename;
pub mod header;
pub mod merge;
pub mod progress;
pub mod scanner;

pub use classify::{ContainerFamily, FileKind, SafetyClass};
pub use enumerate::FileCandidate;
pub use filename::ParsedName;
pub use header::HeaderInfo;
pub use merge::{Record, RecordSet, ScanStats, ScanStatus};
pub use scanner::Scanner;
