use std::fs;

use bill_core::tools::detab::detab_file;
use tempfile::TempDir;

#[test]
fn detab_rewrites_tabs_in_place() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.md");
    fs::write(&path, "| 0301\t| 午饭 |\n\tindented\n").unwrap();

    assert_eq!(detab_file(&path).unwrap(), 2);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "| 0301    | 午饭 |\n    indented\n"
    );
    assert_eq!(detab_file(&path).unwrap(), 0);
}

#[test]
fn detab_reports_missing_files() {
    let dir = TempDir::new().unwrap();
    assert!(detab_file(&dir.path().join("missing.md")).is_err());
}
