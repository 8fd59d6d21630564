use std::fs;

use listvault_rules::{ExportSummary, export_rules, scan_dir};
use serde_json::Value;
use tempfile::tempdir;

#[test]
fn test_export_store_directory() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("13e54af0bc7eefaad97e885deebccda4.txt"),
        "[Adblock Plus 2.0]\n! Checksum: abc\n||Tracker.Example^$third-party\n",
    )
    .unwrap();
    fs::write(dir.path().join("metadata.json"), "{}").unwrap();

    let sources = scan_dir(dir.path()).unwrap();
    let mut out = Vec::new();
    let summary = export_rules(&sources, &mut out).unwrap();

    assert_eq!(summary, ExportSummary { sources: 1, rules: 2 });

    let rows: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["source"], "13e54af0bc7eefaad97e885deebccda4.txt");
    assert_eq!(rows[1]["line"], 3);
    assert_eq!(rows[1]["rule"], "||tracker.example^$third-party");
    assert_eq!(rows[1]["tokens"], serde_json::json!(["tracker", "example", "third", "party"]));
}

#[test]
fn test_export_empty_directory() {
    let dir = tempdir().unwrap();
    let mut out = Vec::new();
    let summary = export_rules(&scan_dir(dir.path()).unwrap(), &mut out).unwrap();

    assert_eq!(summary, ExportSummary::default());
    assert!(out.is_empty());
}
