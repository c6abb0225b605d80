//! FLAC header reader
//!
//! Delegates to symphonia's format probe, which derives sample rate, frame
//! count and channel layout from the compressed stream without decoding
//! audio samples.

use std::fs::File;
use std::path::Path;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::HeaderInfo;
use crate::error::{Result, ScanError};

pub fn decode(path: &Path) -> Result<HeaderInfo> {
    let file = File::open(path)?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    hint.with_extension("flac");

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| decode_err(path, e.to_string()))?;

    let track = probed
        .format
        .default_track()
        .ok_or_else(|| decode_err(path, "stream has no default track".to_string()))?;
    let params = &track.codec_params;

    let sample_rate = params
        .sample_rate
        .ok_or_else(|| decode_err(path, "stream info carries no sample rate".to_string()))?;
    let n_frames = params
        .n_frames
        .ok_or_else(|| decode_err(path, "stream info carries no frame count".to_string()))?;
    let n_channels = params
        .channels
        .map(|c| c.count() as u16)
        .ok_or_else(|| decode_err(path, "stream info carries no channel layout".to_string()))?;

    if sample_rate == 0 {
        return Err(decode_err(path, "sample rate field is zero".to_string()));
    }

    Ok(HeaderInfo {
        sample_rate_hz: sample_rate,
        length_seconds: n_frames as f64 / sample_rate as f64,
        n_channels,
    })
}

fn decode_err(path: &Path, reason: String) -> ScanError {
    ScanError::Decode {
        path: path.to_path_buf(),
        reason,
    }
}
