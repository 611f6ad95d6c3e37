//! Integration test: SyncEngine → SyncLogger → log file
//!
//! Runs real passes over tempdir trees with the real logger attached and
//! verifies the log file carries one correctly formatted line per
//! outcome.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tempfile::tempdir;

use dirmirror_audit::SyncLogger;
use dirmirror_core::domain::TreeRoot;
use dirmirror_sync::SyncEngine;

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn assert_line_format(line: &str) -> (String, String) {
    let (stamp, rest) = line
        .split_once(" - ")
        .unwrap_or_else(|| panic!("malformed log line: {line}"));
    NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| panic!("bad timestamp in log line: {line}"));
    let (level, message) = rest
        .split_once(": ")
        .unwrap_or_else(|| panic!("malformed log line: {line}"));
    (level.to_string(), message.to_string())
}

#[test]
fn test_pass_produces_one_line_per_outcome() {
    let source = tempdir().unwrap();
    let replica = tempdir().unwrap();
    let logs = tempdir().unwrap();
    let log_path = logs.path().join("sync.log");

    fs::create_dir(source.path().join("dir1")).unwrap();
    fs::write(source.path().join("dir1/file1.txt"), b"payload").unwrap();
    fs::write(replica.path().join("stale.txt"), b"old").unwrap();

    let engine = SyncEngine::with_roots(
        TreeRoot::new(source.path().to_path_buf()).unwrap(),
        TreeRoot::new(replica.path().to_path_buf()).unwrap(),
    );
    let logger = SyncLogger::new(&log_path).without_stdout_mirror();

    let report = engine.run_pass(&logger);

    // CreatedDir + Copied + Removed, one line each.
    assert_eq!(report.mutations(), 3);
    let lines = read_lines(&log_path);
    assert_eq!(lines.len(), 3);

    for line in &lines {
        let (level, _) = assert_line_format(line);
        assert_eq!(level, "info");
    }

    assert!(lines.iter().any(|l| l.contains("Created directory")));
    assert!(lines.iter().any(|l| l.contains("Copied")
        && l.contains("file1.txt")));
    assert!(lines.iter().any(|l| l.contains("Removed")
        && l.contains("stale.txt")));
}

#[test]
fn test_second_pass_logs_up_to_date_lines() {
    let source = tempdir().unwrap();
    let replica = tempdir().unwrap();
    let logs = tempdir().unwrap();
    let log_path = logs.path().join("sync.log");

    fs::write(source.path().join("a.txt"), b"a").unwrap();

    let engine = SyncEngine::with_roots(
        TreeRoot::new(source.path().to_path_buf()).unwrap(),
        TreeRoot::new(replica.path().to_path_buf()).unwrap(),
    );
    let logger = SyncLogger::new(&log_path).without_stdout_mirror();

    engine.run_pass(&logger);
    engine.run_pass(&logger);

    let lines = read_lines(&log_path);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Copied"));

    let (level, message) = assert_line_format(&lines[1]);
    assert_eq!(level, "info");
    assert!(message.starts_with("Up to date:"));
}

#[test]
fn test_missing_source_logs_exactly_one_error_line() {
    let replica = tempdir().unwrap();
    let logs = tempdir().unwrap();
    let log_path = logs.path().join("sync.log");

    fs::write(replica.path().join("keep.txt"), b"untouched").unwrap();

    let engine = SyncEngine::with_roots(
        TreeRoot::new(PathBuf::from("/nonexistent/source/root")).unwrap(),
        TreeRoot::new(replica.path().to_path_buf()).unwrap(),
    );
    let logger = SyncLogger::new(&log_path).without_stdout_mirror();

    engine.run_pass(&logger);

    let lines = read_lines(&log_path);
    assert_eq!(lines.len(), 1);
    let (level, message) = assert_line_format(&lines[0]);
    assert_eq!(level, "error");
    assert!(message.contains("does not exist"));

    // Replica untouched.
    assert!(replica.path().join("keep.txt").exists());
}
