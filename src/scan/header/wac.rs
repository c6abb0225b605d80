//! Wildlife Acoustics WAC header decoder
//!
//! The WAC header is a fixed little-endian layout read sequentially from
//! offset 0 with no padding:
//!
//! | Offset | Size | Field       |
//! |--------|------|-------------|
//! | 0      | 4    | magic tag (ASCII, length-checked only) |
//! | 4      | 1    | version     |
//! | 5      | 1    | channels    |
//! | 6      | 2    | frame size  |
//! | 8      | 2    | block size  |
//! | 10     | 2    | flags       |
//! | 12     | 4    | sample rate (Hz) |
//! | 16     | 4    | total sample count |
//!
//! Only the channel count, sample rate and sample count feed the inventory;
//! the remaining fields are consumed to keep the read cursor aligned.

use byteorder::{LittleEndian, ReadBytesExt};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::HeaderInfo;
use crate::error::{Result, ScanError};

/// Decode a WAC header
///
/// Fails with [`ScanError::InvalidFormat`] before opening the file when the
/// extension is not `.wac`, regardless of the actual byte content. The file
/// handle is dropped on every exit path, including mid-header read errors.
pub fn decode(path: &Path) -> Result<HeaderInfo> {
    let is_wac = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wac"));
    if !is_wac {
        return Err(ScanError::InvalidFormat {
            expected: "wac",
            path: path.to_path_buf(),
        });
    }

    let mut reader = BufReader::new(File::open(path)?);

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    let version = reader.read_u8()?;
    let n_channels = reader.read_u8()?;
    let _frame_size = reader.read_u16::<LittleEndian>()?;
    let _block_size = reader.read_u16::<LittleEndian>()?;
    let _flags = reader.read_u16::<LittleEndian>()?;
    let sample_rate = reader.read_u32::<LittleEndian>()?;
    let samples = reader.read_u32::<LittleEndian>()?;

    if sample_rate == 0 {
        return Err(ScanError::Decode {
            path: path.to_path_buf(),
            reason: "sample rate field is zero".to_string(),
        });
    }

    tracing::trace!(
        path = %path.display(),
        magic = %String::from_utf8_lossy(&magic),
        version,
        "decoded wac header"
    );

    // A channel byte other than 1 is treated as stereo
    let n_channels = if n_channels == 1 { 1 } else { 2 };

    Ok(HeaderInfo {
        sample_rate_hz: sample_rate,
        length_seconds: samples as f64 / sample_rate as f64,
        n_channels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_wac(
        path: &Path,
        n_channels: u8,
        sample_rate: u32,
        samples: u32,
    ) {
        let mut file = File::create(path).unwrap();
        file.write_all(b"WAac").unwrap();
        file.write_all(&[4u8]).unwrap(); // version
        file.write_all(&[n_channels]).unwrap();
        file.write_all(&128u16.to_le_bytes()).unwrap(); // frame size
        file.write_all(&32u16.to_le_bytes()).unwrap(); // block size
        file.write_all(&0u16.to_le_bytes()).unwrap(); // flags
        file.write_all(&sample_rate.to_le_bytes()).unwrap();
        file.write_all(&samples.to_le_bytes()).unwrap();
    }

    #[test]
    fn decodes_mono_header_bit_exact() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("LOC_20220101_000000.wac");
        write_wac(&path, 1, 44_100, 441_000);

        let info = decode(&path).unwrap();
        assert_eq!(info.sample_rate_hz, 44_100);
        assert_eq!(info.n_channels, 1);
        assert_eq!(info.length_seconds, 10.0);
    }

    #[test]
    fn non_mono_channel_byte_reads_as_stereo() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("rec.wac");
        write_wac(&path, 3, 24_000, 24_000);
        let info = decode(&path).unwrap();
        assert_eq!(info.n_channels, 2);
        assert_eq!(info.length_seconds, 1.0);
    }

    #[test]
    fn wrong_extension_is_invalid_format_without_reading() {
        // The path does not even exist: the extension gate must fire first
        let err = decode(Path::new("/nonexistent/rec.wav")).unwrap_err();
        assert!(matches!(
            err,
            ScanError::InvalidFormat { expected: "wac", .. }
        ));
    }

    #[test]
    fn truncated_header_is_a_decode_error_not_a_panic() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("short.wac");
        std::fs::write(&path, b"WAac\x04").unwrap();
        assert!(decode(&path).is_err());
    }

    #[test]
    fn zero_sample_rate_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("zero.wac");
        write_wac(&path, 1, 0, 1000);
        let err = decode(&path).unwrap_err();
        assert!(matches!(err, ScanError::Decode { .. }));
    }
}
