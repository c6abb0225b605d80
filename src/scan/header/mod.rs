//! Per-family binary header decoders
//!
//! Each container family exposes the same [`HeaderInfo`] contract so results
//! from heterogeneous file types can be unioned into one table. Dispatch is
//! by the detected [`ContainerFamily`] tag, decided once at enumeration time.

mod flac;
mod wac;
mod wav;

pub use flac::decode as decode_flac;
pub use wac::decode as decode_wac;
pub use wav::decode as decode_wav;

use serde::Serialize;
use std::path::Path;

use crate::error::{Result, ScanError};
use crate::scan::classify::ContainerFamily;

/// Header-derived metadata, structurally identical across families
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeaderInfo {
    pub sample_rate_hz: u32,
    pub length_seconds: f64,
    pub n_channels: u16,
}

/// Decode the header of `path` with the decoder matching its family tag
pub fn decode_header(family: ContainerFamily, path: &Path) -> Result<HeaderInfo> {
    match family {
        ContainerFamily::Wav => wav::decode(path),
        ContainerFamily::Wac => wac::decode(path),
        ContainerFamily::Flac => flac::decode(path),
        ContainerFamily::Unrecognized => Err(ScanError::Decode {
            path: path.to_path_buf(),
            reason: "no decoder for unrecognized container family".to_string(),
        }),
    }
}
