//! Parsing of contract record files.
//!
//! Record files come straight from the block-streaming pipeline, so they are
//! accepted in a few shapes:
//! - a bare JSON array of records
//! - an object wrapping the array (`{"contracts": [...]}`)
//! - camelCase or snake_case keys, numbers or numeric strings

use super::schema::ContractRecord;
use crate::utils::config::RECORD_LIST_FIELD_NAMES;
use crate::utils::error::LoadError;
use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::Path;

/// Parse a record file body into contract records
///
/// **Public** - used by the analyze command and the loader
///
/// Addresses and wallet identifiers are normalized on the way in.
pub fn parse_records(json: &str) -> Result<Vec<ContractRecord>, LoadError> {
    let value: Value = serde_json::from_str(json)?;

    let list = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => RECORD_LIST_FIELD_NAMES
            .iter()
            .find_map(|name| match obj.remove(*name) {
                Some(Value::Array(items)) => {
                    debug!("Reading records from '{}' field", name);
                    Some(items)
                }
                _ => None,
            })
            .ok_or_else(|| {
                LoadError::InvalidFormat(format!(
                    "expected an array or an object with one of {:?}",
                    RECORD_LIST_FIELD_NAMES
                ))
            })?,
        other => {
            return Err(LoadError::InvalidFormat(format!(
                "expected an array of records, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut records = Vec::with_capacity(list.len());
    for item in list {
        let mut record: ContractRecord = serde_json::from_value(item)?;
        normalize_record(&mut record);
        records.push(record);
    }

    let inverted = records
        .iter()
        .filter(|r| r.first_interaction_block > r.last_interaction_block)
        .count();
    if inverted > 0 {
        warn!(
            "{} record(s) have first_interaction_block > last_interaction_block",
            inverted
        );
    }

    debug!("Parsed {} contract records", records.len());

    Ok(records)
}

/// Read and parse a record file from disk
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<ContractRecord>, LoadError> {
    let path = path.as_ref();
    let body = std::fs::read_to_string(path).map_err(|source| LoadError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;
    parse_records(&body)
}

/// Normalize an address to lowercase hex with a 0x prefix
pub fn normalize_address(address: &str) -> String {
    let trimmed = address.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    format!("0x{}", hex.to_ascii_lowercase())
}

/// Check that an address is 20 bytes of hex (with or without 0x)
pub fn is_valid_address(address: &str) -> bool {
    let hex = address.strip_prefix("0x").unwrap_or(address);
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

fn normalize_record(record: &mut ContractRecord) {
    record.address = normalize_address(&record.address);
    if !record.interacting_wallets.is_empty() {
        record.interacting_wallets = record
            .interacting_wallets
            .iter()
            .map(|w| normalize_address(w))
            .collect();
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Deserialize a u64 that may arrive as a number or a numeric string
///
/// Protobuf JSON encodes uint64 as strings, plain JSON as numbers.
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
