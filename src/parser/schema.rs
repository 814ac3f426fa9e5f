//! Report and record schema definitions.
//!
//! This module defines the structure of the JSON artifacts we read and write.
//! Field names follow the artifact format consumed by the dashboards.

use super::records::lenient_u64;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One contract's aggregated interaction summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    /// Hex-encoded contract address (case-insensitive identity)
    pub address: String,

    /// Block of the first observed call in the analysis window
    #[serde(default, alias = "firstInteractionBlock", deserialize_with = "lenient_u64")]
    pub first_interaction_block: u64,

    /// Block of the most recent observed call
    #[serde(default, alias = "lastInteractionBlock", deserialize_with = "lenient_u64")]
    pub last_interaction_block: u64,

    /// Calls observed in the analysis window
    #[serde(default, alias = "totalCalls", deserialize_with = "lenient_u64")]
    pub total_calls: u64,

    /// Distinct calling addresses
    #[serde(default, alias = "uniqueWallets", deserialize_with = "lenient_u64")]
    pub unique_wallets: u64,

    /// Derived: total_calls / unique_wallets, 0 when there are no wallets
    #[serde(default, alias = "avgCallsPerWallet")]
    pub avg_calls_per_wallet: f64,

    /// Wallets that called this contract
    #[serde(default, alias = "interactingWallets")]
    pub interacting_wallets: BTreeSet<String>,

    /// First seen inside the analysis window (absent when not exported)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new_contract: Option<bool>,

    /// Day bucket (seconds since epoch) this record was aggregated for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_timestamp: Option<i64>,

    /// Whether the caller behind this record had interacted before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_repeat_user: Option<bool>,
}

impl ContractRecord {
    /// Create a record with counts only; blocks and wallets start empty
    pub fn new(address: impl Into<String>, total_calls: u64, unique_wallets: u64) -> Self {
        Self {
            address: address.into(),
            first_interaction_block: 0,
            last_interaction_block: 0,
            total_calls,
            unique_wallets,
            avg_calls_per_wallet: 0.0,
            interacting_wallets: BTreeSet::new(),
            is_new_contract: None,
            day_timestamp: None,
            is_repeat_user: None,
        }
    }

    pub fn with_blocks(mut self, first: u64, last: u64) -> Self {
        self.first_interaction_block = first;
        self.last_interaction_block = last;
        self
    }

    /// Whether this record refers to the same contract as `other`
    pub fn same_contract(&self, other: &ContractRecord) -> bool {
        super::records::normalize_address(&self.address)
            == super::records::normalize_address(&other.address)
    }
}

/// Per-day activity totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub day_timestamp: i64,
    pub active_contracts: u64,
    pub new_contracts: u64,
    pub total_calls: u64,
    pub unique_wallets: u64,
}

/// Split of the analysed universe into first-seen and returning contracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewVsReturning {
    pub new_contracts: u64,
    pub returning_contracts: u64,
}

/// Top-level report structure (the `latest_analysis.json` artifact)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractAnalysis {
    /// Ranked by total calls
    #[serde(default)]
    pub most_active_contracts: Vec<ContractRecord>,

    /// Ranked by unique wallets
    #[serde(default)]
    pub most_popular_contracts: Vec<ContractRecord>,

    /// Ranked by average calls per wallet
    #[serde(default)]
    pub most_intensive_contracts: Vec<ContractRecord>,

    /// Ranked by first interaction block
    #[serde(default)]
    pub newest_contracts: Vec<ContractRecord>,

    /// Distinct contracts in the analysed universe
    pub total_contracts_analyzed: u64,

    /// When the report was produced
    pub analysis_timestamp: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_stats: Option<Vec<DailyStats>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_vs_returning_contracts: Option<NewVsReturning>,

    /// Optional fields that hold synthetic placeholder data, not measurements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placeholder_fields: Vec<String>,
}

impl ContractAnalysis {
    /// Zero-valued report returned when the real artifact is unavailable
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            most_active_contracts: Vec::new(),
            most_popular_contracts: Vec::new(),
            most_intensive_contracts: Vec::new(),
            newest_contracts: Vec::new(),
            total_contracts_analyzed: 0,
            analysis_timestamp: format_timestamp(now),
            daily_stats: None,
            new_vs_returning_contracts: None,
            placeholder_fields: Vec::new(),
        }
    }

    /// Get one of the four ranked views
    pub fn view(&self, kind: RankKey) -> &[ContractRecord] {
        match kind {
            RankKey::TotalCalls => &self.most_active_contracts,
            RankKey::UniqueWallets => &self.most_popular_contracts,
            RankKey::AvgCallsPerWallet => &self.most_intensive_contracts,
            RankKey::Recency => &self.newest_contracts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_contracts_analyzed == 0 && RankKey::ALL.iter().all(|k| self.view(*k).is_empty())
    }

    pub fn has_placeholders(&self) -> bool {
        !self.placeholder_fields.is_empty()
    }
}

/// Sort key behind each ranked view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankKey {
    /// "Most active"
    TotalCalls,
    /// "Most popular"
    UniqueWallets,
    /// "Most intensive"
    AvgCallsPerWallet,
    /// "Newest"
    Recency,
}

impl RankKey {
    pub const ALL: [RankKey; 4] = [
        RankKey::TotalCalls,
        RankKey::UniqueWallets,
        RankKey::AvgCallsPerWallet,
        RankKey::Recency,
    ];

    /// Report field that holds this view
    pub fn field_name(&self) -> &'static str {
        match self {
            RankKey::TotalCalls => "most_active_contracts",
            RankKey::UniqueWallets => "most_popular_contracts",
            RankKey::AvgCallsPerWallet => "most_intensive_contracts",
            RankKey::Recency => "newest_contracts",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RankKey::TotalCalls => "Most Active Contracts",
            RankKey::UniqueWallets => "Most Popular Contracts",
            RankKey::AvgCallsPerWallet => "Most Intensive Contracts",
            RankKey::Recency => "Newest Contracts",
        }
    }
}

impl std::str::FromStr for RankKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" | "calls" | "total_calls" => Ok(RankKey::TotalCalls),
            "popular" | "wallets" | "unique_wallets" => Ok(RankKey::UniqueWallets),
            "intensive" | "avg" | "avg_calls_per_wallet" => Ok(RankKey::AvgCallsPerWallet),
            "newest" | "recent" | "recency" => Ok(RankKey::Recency),
            other => Err(format!(
                "unknown view '{}' (expected active, popular, intensive or newest)",
                other
            )),
        }
    }
}

/// Format a timestamp the way report artifacts carry it
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_report_is_zero_valued() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let report = ContractAnalysis::empty(now);

        assert!(report.is_empty());
        assert_eq!(report.analysis_timestamp, "2024-01-01T00:00:00.000Z");
        assert!(report.daily_stats.is_none());
    }

    #[test]
    fn test_record_accepts_camel_case_and_string_numbers() {
        let json = r#"{
            "address": "0xabc",
            "firstInteractionBlock": "22000000",
            "lastInteractionBlock": 22000010,
            "totalCalls": "42",
            "uniqueWallets": 7,
            "interactingWallets": ["0x2", "0x1"]
        }"#;

        let record: ContractRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.first_interaction_block, 22_000_000);
        assert_eq!(record.last_interaction_block, 22_000_010);
        assert_eq!(record.total_calls, 42);
        assert_eq!(record.unique_wallets, 7);
        assert_eq!(record.interacting_wallets.len(), 2);
    }

    #[test]
    fn test_optional_flags_omitted_when_absent() {
        let record = ContractRecord::new("0xa", 1, 1);
        let json = serde_json::to_string(&record).unwrap();

        assert!(!json.contains("is_new_contract"));
        assert!(!json.contains("day_timestamp"));
        assert!(json.contains("\"first_interaction_block\":0"));
    }

    #[test]
    fn test_rank_key_from_str() {
        assert_eq!("active".parse::<RankKey>().unwrap(), RankKey::TotalCalls);
        assert_eq!("Newest".parse::<RankKey>().unwrap(), RankKey::Recency);
        assert!("loudest".parse::<RankKey>().is_err());
    }

    #[test]
    fn test_same_contract_ignores_case_and_prefix() {
        let a = ContractRecord::new("0xABCDEF", 1, 1);
        let b = ContractRecord::new("abcdef", 2, 2);
        assert!(a.same_contract(&b));
    }
}
