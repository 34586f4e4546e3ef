use std::fs;

use checker_engine::{ensure_output_dir, write_atomically};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn rejects_file_as_output_dir() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("plain");
    fs::write(&file_path, "x").unwrap();
    assert!(ensure_output_dir(&file_path).is_err());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("reports").join("report.txt");

    write_atomically(&target, "first").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "first");

    write_atomically(&target, "second").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "second");

    let leftovers = fs::read_dir(target.parent().unwrap()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let target = blocker.join("report.txt");
    assert!(write_atomically(&target, "data").is_err());
    assert!(!temp.path().join("report.txt").exists());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
}
