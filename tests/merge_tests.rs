use contract_activity::merge::{merge_directory, total_calls_of};
use contract_activity::utils::config::MERGE_LIMIT;
use contract_activity::utils::error::MergeError;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn write_records(dir: &TempDir, name: &str, calls: impl Iterator<Item = u64>) {
    let records: Vec<Value> = calls
        .map(|c| json!({"address": format!("0x{:040x}", c), "total_calls": c}))
        .collect();
    fs::write(dir.path().join(name), serde_json::to_string(&records).unwrap()).unwrap();
}

#[test]
fn test_merge_two_files_keeps_top_hundred() {
    let dir = TempDir::new().unwrap();
    write_records(&dir, "a.json", 0..60);
    write_records(&dir, "b.json", 1000..1070);

    let merged = merge_directory(dir.path(), MERGE_LIMIT).unwrap();

    assert_eq!(merged.len(), 100);
    assert!(merged
        .windows(2)
        .all(|w| total_calls_of(&w[0]) >= total_calls_of(&w[1])));
    assert_eq!(total_calls_of(&merged[0]), 1069);
    // All 70 from b.json outrank everything in a.json
    assert_eq!(total_calls_of(&merged[69]), 1000);
    assert_eq!(total_calls_of(&merged[99]), 30);
}

#[test]
fn test_merge_skips_non_array_and_non_json_files() {
    let dir = TempDir::new().unwrap();
    write_records(&dir, "good.json", [5, 9].into_iter());
    fs::write(dir.path().join("object.json"), r#"{"total_calls": 100}"#).unwrap();
    fs::write(dir.path().join("broken.json"), "not json").unwrap();
    fs::write(dir.path().join("notes.txt"), "[{\"total_calls\": 500}]").unwrap();

    let merged = merge_directory(dir.path(), MERGE_LIMIT).unwrap();

    let calls: Vec<u64> = merged.iter().map(total_calls_of).collect();
    assert_eq!(calls, vec![9, 5]);
}

#[test]
fn test_merge_passes_records_through_untouched() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("one.json"),
        r#"[{"address": "0xABC", "total_calls": 3, "label": "router"}]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("two.json"),
        r#"[{"address": "0xABC", "total_calls": 3, "label": "router"}]"#,
    )
    .unwrap();

    let merged = merge_directory(dir.path(), MERGE_LIMIT).unwrap();

    // No deduplication
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0]["address"], "0xABC");
    assert_eq!(merged[0]["label"], "router");
}

#[test]
fn test_merge_missing_directory_errors() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let result = merge_directory(&missing, MERGE_LIMIT);

    assert!(matches!(result, Err(MergeError::DirectoryUnreadable { .. })));
}
