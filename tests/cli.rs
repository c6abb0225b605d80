//! Black-box CLI tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn pamscan() -> Command {
    Command::cargo_bin("pamscan").unwrap()
}

fn write_wac(path: &Path, sample_rate: u32, samples: u32) {
    let mut file = File::create(path).unwrap();
    file.write_all(b"WAac").unwrap();
    file.write_all(&[4u8, 1u8]).unwrap();
    file.write_all(&128u16.to_le_bytes()).unwrap();
    file.write_all(&32u16.to_le_bytes()).unwrap();
    file.write_all(&0u16.to_le_bytes()).unwrap();
    file.write_all(&sample_rate.to_le_bytes()).unwrap();
    file.write_all(&samples.to_le_bytes()).unwrap();
    file.write_all(&[0u8; 256]).unwrap();
}

#[test]
fn scan_json_reports_records_and_status() {
    let tmp = TempDir::new().unwrap();
    write_wac(&tmp.path().join("SITE-A_20220615_060000.wac"), 44_100, 441_000);

    let output = pamscan()
        .arg("scan")
        .arg(tmp.path())
        .args(["--metadata", "--size-floor", "100", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["status"]["state"], "complete");
    let records = value["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["location"], "SITE-A");
    assert_eq!(records[0]["header"]["length_seconds"], 10.0);
    assert_eq!(records[0]["time_index"], 1);
}

#[test]
fn scan_csv_has_header_row() {
    let tmp = TempDir::new().unwrap();
    write_wac(&tmp.path().join("SITE-A_20220615_060000.wac"), 44_100, 441_000);

    pamscan()
        .arg("scan")
        .arg(tmp.path())
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("path,location,timestamp"));
}

#[test]
fn missing_root_fails() {
    pamscan()
        .arg("scan")
        .arg("/definitely/not/a/real/root")
        .assert()
        .failure()
        .stderr(predicate::str::contains("path not found"));
}

#[test]
fn empty_tree_fails_with_empty_result() {
    let tmp = TempDir::new().unwrap();
    pamscan()
        .arg("scan")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no candidate files"));
}

#[test]
fn bad_timezone_is_rejected() {
    let tmp = TempDir::new().unwrap();
    write_wac(&tmp.path().join("A_20220101_000000.wac"), 44_100, 44_100);

    pamscan()
        .arg("scan")
        .arg(tmp.path())
        .args(["--timezone", "Mars/Olympus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown timezone"));
}

#[test]
fn bad_file_type_is_rejected_by_the_parser() {
    pamscan()
        .arg("scan")
        .args(["--file-type", "aiff", "."])
        .assert()
        .failure();
}

#[test]
fn filter_splits_against_catalog() {
    let tmp = TempDir::new().unwrap();
    write_wac(&tmp.path().join("SITE-A_20220615_060000.wac"), 44_100, 44_100);
    write_wac(&tmp.path().join("SITE-A_20220615_090000.wac"), 44_100, 44_100);
    let catalog = tmp.path().join("known.csv");
    fs::write(&catalog, "location,timestamp\nSITE-A,2022-06-15T06:00:00\n").unwrap();

    // Only the 09:00 recording is new
    pamscan()
        .arg("filter")
        .arg(tmp.path())
        .arg("--catalog")
        .arg(&catalog)
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20220615_090000"))
        .stdout(predicate::str::contains("20220615_060000").not());
}

#[test]
fn stage_lists_source_paths() {
    let tmp = TempDir::new().unwrap();
    write_wac(&tmp.path().join("SITE-A_20220615_060000.wac"), 44_100, 44_100);

    pamscan()
        .arg("stage")
        .arg(tmp.path())
        .args(["--dest", "/staging/batch-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SITE-A_20220615_060000.wac"));
}
