//! WAV header reader
//!
//! Delegates the RIFF parsing to `hound` and derives the recording length
//! from the native `samples` and `sample_rate` fields, rounded to two
//! decimal places to match how downstream catalogs store WAV durations.

use std::path::Path;

use super::HeaderInfo;
use crate::error::{Result, ScanError};

pub fn decode(path: &Path) -> Result<HeaderInfo> {
    let reader = hound::WavReader::open(path).map_err(|e| ScanError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(ScanError::Decode {
            path: path.to_path_buf(),
            reason: "sample rate field is zero".to_string(),
        });
    }

    // duration() is the per-channel sample count
    let samples = reader.duration();
    let length_seconds =
        (samples as f64 / spec.sample_rate as f64 * 100.0).round() / 100.0;

    Ok(HeaderInfo {
        sample_rate_hz: spec.sample_rate,
        length_seconds,
        n_channels: spec.channels,
    })
}
