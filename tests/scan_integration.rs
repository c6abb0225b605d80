//! End-to-end pipeline tests over synthetic archive trees

use std::collections::HashSet;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use pamscan::scan::{FileKind, SafetyClass, ScanStatus, Scanner};
use pamscan::{ScanConfig, ScanError};

/// Config with a tiny size floor so small synthetic fixtures count as Safe
fn test_config() -> ScanConfig {
    ScanConfig {
        unsafe_floor_bytes: 100,
        ..ScanConfig::default()
    }
}

fn write_wav(path: &Path, sample_rate: u32, channels: u16, frames: u32) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..(frames * channels as u32) {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

fn write_wac(path: &Path, n_channels: u8, sample_rate: u32, samples: u32) {
    let mut file = File::create(path).unwrap();
    file.write_all(b"WAac").unwrap();
    file.write_all(&[4u8, n_channels]).unwrap();
    file.write_all(&128u16.to_le_bytes()).unwrap();
    file.write_all(&32u16.to_le_bytes()).unwrap();
    file.write_all(&0u16.to_le_bytes()).unwrap();
    file.write_all(&sample_rate.to_le_bytes()).unwrap();
    file.write_all(&samples.to_le_bytes()).unwrap();
    // Audio payload so the file clears the test size floor
    file.write_all(&[0u8; 256]).unwrap();
}

/// A mixed-family tree: valid WAV and WAC, a corrupt FLAC, an undersized
/// file, and a stem with an unparseable date
fn build_archive() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let day_one = tmp.path().join("SITE-A").join("june");
    fs::create_dir_all(&day_one).unwrap();

    write_wav(&day_one.join("SITE-A_20220615_060000.wav"), 48_000, 1, 4_800);
    write_wav(&day_one.join("SITE-A_20220615_120000.wav"), 48_000, 1, 4_800);
    write_wac(&day_one.join("SITE-A_20220615_090000.wac"), 1, 44_100, 441_000);
    fs::write(
        day_one.join("SITE-A_badclock.flac"),
        vec![0u8; 512], // not a FLAC stream
    )
    .unwrap();
    // Below the 100-byte floor
    fs::write(day_one.join("SITE-A_20220615_180000.wav"), b"tiny").unwrap();

    tmp
}

fn record_paths(records: &[pamscan::Record]) -> HashSet<PathBuf> {
    records.iter().map(|r| r.path.clone()).collect()
}

#[test]
fn one_record_per_file_no_loss_no_duplication() {
    let tmp = build_archive();
    let scanner = Scanner::new(test_config());
    let set = scanner
        .scan(&[tmp.path().to_path_buf()], FileKind::All, true, None)
        .unwrap();

    assert_eq!(set.records.len(), 5);
    assert_eq!(record_paths(&set.records).len(), 5);
    assert_eq!(set.status, ScanStatus::Complete);
}

#[test]
fn below_floor_files_carry_no_header_regardless_of_content() {
    let tmp = TempDir::new().unwrap();
    // A perfectly valid WAV, but below the default 0.5 MB floor
    write_wav(&tmp.path().join("SITE_20220101_060000.wav"), 48_000, 1, 1_000);

    let scanner = Scanner::new(ScanConfig::default());
    let set = scanner
        .scan(&[tmp.path().to_path_buf()], FileKind::All, true, None)
        .unwrap();

    let record = &set.records[0];
    assert_eq!(record.safety, SafetyClass::Unsafe);
    assert!(record.header.is_none());
    assert!(record.header_error.is_none());
    assert_eq!(set.stats.unsafe_files, 1);
    assert_eq!(set.stats.decode_attempted, 0);
}

#[test]
fn header_fields_flow_through_the_pipeline() {
    let tmp = build_archive();
    let scanner = Scanner::new(test_config());
    let set = scanner
        .scan(&[tmp.path().to_path_buf()], FileKind::All, true, None)
        .unwrap();

    let wac = set
        .records
        .iter()
        .find(|r| r.extension_is("wac"))
        .unwrap();
    let header = wac.header.unwrap();
    assert_eq!(header.sample_rate_hz, 44_100);
    assert_eq!(header.n_channels, 1);
    assert_eq!(header.length_seconds, 10.0);

    let wav = set
        .records
        .iter()
        .find(|r| r.path.ends_with("SITE-A_20220615_060000.wav"))
        .unwrap();
    let header = wav.header.unwrap();
    assert_eq!(header.sample_rate_hz, 48_000);
    assert_eq!(header.length_seconds, 0.1);
}

trait ExtensionIs {
    fn extension_is(&self, ext: &str) -> bool;
}

impl ExtensionIs for pamscan::Record {
    fn extension_is(&self, ext: &str) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext))
    }
}

#[test]
fn one_familys_decode_failure_never_blocks_another() {
    let tmp = build_archive();
    let scanner = Scanner::new(test_config());
    let set = scanner
        .scan(&[tmp.path().to_path_buf()], FileKind::All, true, None)
        .unwrap();

    // The corrupt FLAC is recorded as a per-file failure...
    let flac = set.records.iter().find(|r| r.extension_is("flac")).unwrap();
    assert!(flac.header.is_none());
    assert!(flac.header_error.is_some());

    // ...while WAV and WAC partitions decoded normally
    assert_eq!(set.stats.decode_failures, 1);
    assert_eq!(set.stats.decoded, 3);
    assert_eq!(set.status, ScanStatus::Complete);
}

#[test]
fn time_index_is_monotone_with_timestamp_within_a_day() {
    let tmp = build_archive();
    let scanner = Scanner::new(test_config());
    let set = scanner
        .scan(&[tmp.path().to_path_buf()], FileKind::All, true, None)
        .unwrap();

    // Four parseable timestamps on 2022-166 at SITE-A: 06:00, 09:00, 12:00, 18:00
    let mut indexed: Vec<_> = set
        .records
        .iter()
        .filter(|r| r.time_index.is_some())
        .map(|r| (r.name.timestamp.unwrap(), r.time_index.unwrap()))
        .collect();
    indexed.sort();
    let indices: Vec<u32> = indexed.iter().map(|(_, i)| *i).collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);

    // The unparseable stem is present but unindexed
    let unparsed = set
        .records
        .iter()
        .find(|r| r.name.raw_stem == "SITE-A_badclock")
        .unwrap();
    assert!(unparsed.name.timestamp.is_none());
    assert!(unparsed.time_index.is_none());
    assert_eq!(unparsed.name.location, "SITE-A");
    assert_eq!(unparsed.name.timestamp_raw, "badclock");
}

#[test]
fn rescanning_an_unchanged_tree_is_idempotent() {
    let tmp = build_archive();
    let scanner = Scanner::new(test_config());
    let roots = [tmp.path().to_path_buf()];

    let first = scanner.scan(&roots, FileKind::All, true, None).unwrap();
    let second = scanner.scan(&roots, FileKind::All, true, None).unwrap();

    // Identical up to time-of-scan metadata (duration)
    assert_eq!(first.records, second.records);
    assert_eq!(first.status, second.status);
}

#[test]
fn per_family_scans_remerge_to_the_all_family_scan() {
    let tmp = build_archive();
    let scanner = Scanner::new(test_config());
    let roots = [tmp.path().to_path_buf()];

    let all = scanner.scan(&roots, FileKind::All, true, None).unwrap();

    let mut merged = HashSet::new();
    for kind in [FileKind::Wav, FileKind::Wac, FileKind::Flac] {
        match scanner.scan(&roots, kind, true, None) {
            Ok(set) => merged.extend(record_paths(&set.records)),
            Err(ScanError::EmptyResult) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(merged, record_paths(&all.records));
}

#[test]
fn name_only_and_metadata_scans_share_row_identity() {
    let tmp = build_archive();
    let scanner = Scanner::new(test_config());
    let roots = [tmp.path().to_path_buf()];

    let names = scanner.scan(&roots, FileKind::All, false, None).unwrap();
    let full = scanner.scan(&roots, FileKind::All, true, None).unwrap();

    let name_paths: Vec<_> = names.records.iter().map(|r| &r.path).collect();
    let full_paths: Vec<_> = full.records.iter().map(|r| &r.path).collect();
    assert_eq!(name_paths, full_paths);
    assert!(names.records.iter().all(|r| r.header.is_none()));
}

#[test]
fn timezone_selection_changes_only_the_derived_instant() {
    let tmp = build_archive();
    let scanner = Scanner::new(test_config());
    let roots = [tmp.path().to_path_buf()];

    let naive = scanner.scan(&roots, FileKind::Wav, false, None).unwrap();
    let eastern = scanner
        .scan(&roots, FileKind::Wav, false, Some("US/Eastern"))
        .unwrap();

    for (a, b) in naive.records.iter().zip(&eastern.records) {
        assert_eq!(a.name.timestamp, b.name.timestamp);
        assert_eq!(a.time_index, b.time_index);
        if a.name.timestamp.is_some() {
            assert!(a.name.timestamp_utc.is_none());
            assert!(b.name.timestamp_utc.is_some());
        }
    }
}

#[test]
fn catalog_filter_partitions_by_join_key() {
    let tmp = build_archive();
    let scanner = Scanner::new(test_config());
    let set = scanner
        .scan(&[tmp.path().to_path_buf()], FileKind::All, false, None)
        .unwrap();

    let csv_path = tmp.path().join("known.csv");
    fs::write(
        &csv_path,
        "location,timestamp\nSITE-A,2022-06-15T06:00:00\nSITE-A,2022-06-15T09:00:00\n",
    )
    .unwrap();
    let known = pamscan::catalog::KnownRecordings::from_csv_path(&csv_path).unwrap();

    let (already_known, new) = known.partition(&set.records);
    assert_eq!(already_known.len(), 2);
    assert_eq!(new.len(), 3);
    // Unparseable-stem records always count as new
    assert!(new.iter().any(|r| r.name.timestamp.is_none()));

    let plan = pamscan::stage::StagingPlan::for_records(
        new.into_iter(),
        Path::new("/staging/batch-1"),
    );
    assert_eq!(plan.len(), 3);
}

#[test]
fn deadline_zero_preserves_rows_as_partial() {
    let tmp = build_archive();
    let config = ScanConfig {
        deadline_secs: Some(0),
        ..test_config()
    };
    let scanner = Scanner::new(config);
    let set = scanner
        .scan(&[tmp.path().to_path_buf()], FileKind::All, true, None)
        .unwrap();

    assert!(set.is_partial());
    assert_eq!(set.records.len(), 5);
    assert!(set.records.iter().all(|r| r.header.is_none()));
}
