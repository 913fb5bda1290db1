//! Test helpers for writing request files and reading JSON reports.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tempfile::TempDir;

/// Two drivers either side of the first passenger; the second passenger
/// waits behind the first driver.
pub(super) const CONTESTED_REQUEST: &str = r#"{
    "drivers": [
        {"id": 10, "location": {"lat": 0.0, "lng": 0.0}},
        {"id": 20, "location": {"lat": 2.0, "lng": 0.0}}
    ],
    "passengers": [
        {"id": 1, "pickup": {"lat": 1.0, "lng": 0.0}},
        {"id": 2, "pickup": {"lat": -1.0, "lng": 0.0}}
    ]
}"#;

pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    relay_fs::write_file(path, contents).expect("write fixture file");
}

pub(super) fn parse_report(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("report should be valid JSON")
}

/// Passenger-to-driver pairs listed in a dispatch report.
pub(super) fn pairs(report: &Value) -> Vec<(u64, u64)> {
    report
        .get("assignments")
        .and_then(Value::as_array)
        .expect("assignments array")
        .iter()
        .map(|assignment| {
            let id = |key: &str| assignment.get(key).and_then(Value::as_u64).expect("id");
            (id("passenger"), id("driver"))
        })
        .collect()
}
