//! Size safety classification and container family detection

use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ScanError;

/// Whether a file is large enough to plausibly contain a valid header
///
/// `Unsafe` files bypass header decoding entirely but are still retained in
/// the output with null metadata fields, never silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyClass {
    Safe,
    Unsafe,
}

impl SafetyClass {
    /// Pure classification over an already-stat'd size
    pub fn from_size(size_bytes: u64, floor_bytes: u64) -> Self {
        if size_bytes <= floor_bytes {
            SafetyClass::Unsafe
        } else {
            SafetyClass::Safe
        }
    }
}

impl fmt::Display for SafetyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyClass::Safe => write!(f, "safe"),
            SafetyClass::Unsafe => write!(f, "unsafe"),
        }
    }
}

/// Recognized audio container classes, each with its own header decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFamily {
    /// Broadcast-style RIFF container
    Wav,
    /// Wildlife Acoustics proprietary recorder format
    Wac,
    /// Lossless compressed container
    Flac,
    /// Anything else that slipped through the selector
    Unrecognized,
}

impl ContainerFamily {
    /// Detect the family from a path's extension (case-insensitive)
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("wav") => ContainerFamily::Wav,
            Some("wac") => ContainerFamily::Wac,
            Some("flac") => ContainerFamily::Flac,
            _ => ContainerFamily::Unrecognized,
        }
    }

    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ContainerFamily::Wav => Some("wav"),
            ContainerFamily::Wac => Some("wac"),
            ContainerFamily::Flac => Some("flac"),
            ContainerFamily::Unrecognized => None,
        }
    }
}

impl fmt::Display for ContainerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.extension() {
            Some(ext) => write!(f, "{ext}"),
            None => write!(f, "unrecognized"),
        }
    }
}

/// File-type selector for a scan invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Wav,
    Wac,
    Flac,
    /// All recognized container families
    All,
}

impl FileKind {
    /// Does a detected family match this selector?
    pub fn matches(&self, family: ContainerFamily) -> bool {
        match self {
            FileKind::Wav => family == ContainerFamily::Wav,
            FileKind::Wac => family == ContainerFamily::Wac,
            FileKind::Flac => family == ContainerFamily::Flac,
            FileKind::All => family != ContainerFamily::Unrecognized,
        }
    }
}

impl FromStr for FileKind {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wav" => Ok(FileKind::Wav),
            "wac" => Ok(FileKind::Wac),
            "flac" => Ok(FileKind::Flac),
            "all" => Ok(FileKind::All),
            other => Err(ScanError::InvalidArgument(format!(
                "unknown file type '{other}' (expected wav, wac, flac or all)"
            ))),
        }
    }
}
