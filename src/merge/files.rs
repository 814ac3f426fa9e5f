//! Merge record files and keep the busiest contracts.
//!
//! Records pass through untouched as JSON objects. There is no
//! deduplication: a contract present in two files appears twice.

use crate::utils::error::MergeError;
use log::{debug, info, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Read every `*.json` file in `dir` and return the top `limit` records
///
/// **Public** - backs the merge command and the legacy `/api.php` route
///
/// Files are read in name order. A file that can't be read, isn't valid
/// JSON, or doesn't hold a top-level array is skipped with a warning.
pub fn merge_directory(dir: impl AsRef<Path>, limit: usize) -> Result<Vec<Value>, MergeError> {
    let dir = dir.as_ref();
    let files = list_json_files(dir)?;

    info!("Merging {} JSON files from {}", files.len(), dir.display());

    let mut all_records = Vec::new();
    for file in &files {
        match read_record_array(file) {
            Some(records) => {
                debug!("{}: {} records", file.display(), records.len());
                all_records.extend(records);
            }
            None => warn!("Skipping {}: not a JSON array of records", file.display()),
        }
    }

    Ok(top_by_total_calls(all_records, limit))
}

/// Stable sort by `total_calls` descending, then truncate
pub fn top_by_total_calls(mut records: Vec<Value>, limit: usize) -> Vec<Value> {
    records.sort_by(|a, b| total_calls_of(b).cmp(&total_calls_of(a)));
    records.truncate(limit);
    records
}

/// Call count of a raw record; missing or non-numeric counts as 0
pub fn total_calls_of(record: &Value) -> u64 {
    match record.get("total_calls") {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>, MergeError> {
    let entries = std::fs::read_dir(dir).map_err(|source| MergeError::DirectoryUnreadable {
        path: dir.display().to_string(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    files.sort();

    Ok(files)
}

fn read_record_array(path: &Path) -> Option<Vec<Value>> {
    let body = match std::fs::read_to_string(path) {
        Ok(body) => body,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Array(records)) => Some(records),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_by_total_calls_is_stable() {
        let records = vec![
            json!({"address": "0x1", "total_calls": 5}),
            json!({"address": "0x2", "total_calls": 9}),
            json!({"address": "0x3", "total_calls": 5}),
        ];

        let top = top_by_total_calls(records, 100);

        let order: Vec<&str> = top.iter().map(|r| r["address"].as_str().unwrap()).collect();
        assert_eq!(order, vec!["0x2", "0x1", "0x3"]);
    }

    #[test]
    fn test_total_calls_of() {
        assert_eq!(total_calls_of(&json!({"total_calls": 12})), 12);
        assert_eq!(total_calls_of(&json!({"total_calls": "7"})), 7);
        assert_eq!(total_calls_of(&json!({"total_calls": 3.9})), 3);
        assert_eq!(total_calls_of(&json!({"total_calls": -4})), 0);
        assert_eq!(total_calls_of(&json!({"address": "0x1"})), 0);
        assert_eq!(total_calls_of(&json!("not an object")), 0);
    }

    #[test]
    fn test_merge_missing_directory() {
        let result = merge_directory("/nonexistent/data/dir", 100);
        assert!(matches!(result, Err(MergeError::DirectoryUnreadable { .. })));
    }

    #[test]
    fn test_merge_skips_non_array_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), r#"[{"total_calls": 1}]"#).unwrap();
        std::fs::write(dir.path().join("b.json"), r#"{"total_calls": 100}"#).unwrap();
        std::fs::write(dir.path().join("c.json"), "garbage").unwrap();
        std::fs::write(dir.path().join("d.txt"), r#"[{"total_calls": 50}]"#).unwrap();

        let merged = merge_directory(dir.path(), 100).unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(total_calls_of(&merged[0]), 1);
    }
}
