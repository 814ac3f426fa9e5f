//! Plain-text rendering of ranked views for the terminal.
//!
//! One parametrized renderer serves every view; address width is a flag
//! rather than a separate layout.

use crate::parser::schema::{ContractAnalysis, ContractRecord, RankKey};
use chrono::{DateTime, Utc};

/// Display options for a ranked table
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Shorten addresses to `0x1234...abcd`
    pub short_addresses: bool,
    /// Estimated first-seen time per row, aligned with the records
    pub first_seen: Option<Vec<Option<DateTime<Utc>>>>,
}

/// Shorten an address for narrow displays
pub fn format_address(address: &str, short: bool) -> String {
    if address.is_empty() {
        return "-".to_string();
    }
    if !short || address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

/// Integer with thousands separators
pub fn format_number(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Decimal with two places and thousands separators
pub fn format_decimal(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    match formatted.split_once('.') {
        Some((int_part, frac)) => format!("{}.{}", group_thousands(int_part), frac),
        None => formatted,
    }
}

/// Calendar date of a unix timestamp, "-" when out of range
pub fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{}{}", sign, out)
}

/// Render one ranked view as a text table
pub fn render_view(records: &[ContractRecord], key: RankKey, options: &TableOptions) -> String {
    let address_width = if options.short_addresses { 13 } else { 42 };
    let mut lines = Vec::new();

    lines.push(format!("  {}", key.title().to_uppercase()));

    let mut header = format!(
        "  {:>3}  {:<aw$}  {:>12}  {:>12}  {:>12}  {:>10}  {:>10}",
        "#",
        "Contract Address",
        "First Block",
        "Last Block",
        "Calls",
        "Wallets",
        "Calls/Wlt",
        aw = address_width
    );
    if options.first_seen.is_some() {
        header.push_str(&format!("  {:>10}", "First Seen"));
    }
    lines.push(header.clone());
    lines.push(format!("  {}", "-".repeat(header.len() - 2)));

    if records.is_empty() {
        lines.push("  (no contracts)".to_string());
    }

    for (i, record) in records.iter().enumerate() {
        let mut line = format!(
            "  {:>3}  {:<aw$}  {:>12}  {:>12}  {:>12}  {:>10}  {:>10}",
            i + 1,
            format_address(&record.address, options.short_addresses),
            format_number(record.first_interaction_block),
            format_number(record.last_interaction_block),
            format_number(record.total_calls),
            format_number(record.unique_wallets),
            format_decimal(record.avg_calls_per_wallet),
            aw = address_width
        );
        if let Some(first_seen) = &options.first_seen {
            let label = first_seen
                .get(i)
                .copied()
                .flatten()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            line.push_str(&format!("  {:>10}", label));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Render the report header: totals, daily stats and the new/returning split
pub fn render_summary(report: &ContractAnalysis) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "  Contracts analyzed: {}",
        format_number(report.total_contracts_analyzed)
    ));
    lines.push(format!("  Generated at:       {}", report.analysis_timestamp));

    if let Some(split) = &report.new_vs_returning_contracts {
        lines.push(format!(
            "  New / returning:    {} / {}{}",
            format_number(split.new_contracts),
            format_number(split.returning_contracts),
            placeholder_note(report, "new_vs_returning_contracts")
        ));
    }

    if let Some(daily) = &report.daily_stats {
        lines.push(String::new());
        lines.push(format!(
            "  DAILY ACTIVITY{}",
            placeholder_note(report, "daily_stats")
        ));
        lines.push(format!(
            "  {:<10}  {:>10}  {:>8}  {:>12}  {:>10}",
            "Date", "Active", "New", "Calls", "Wallets"
        ));

        let mut days: Vec<_> = daily.iter().collect();
        days.sort_by_key(|d| d.day_timestamp);
        for day in days {
            lines.push(format!(
                "  {:<10}  {:>10}  {:>8}  {:>12}  {:>10}",
                format_date(day.day_timestamp),
                format_number(day.active_contracts),
                format_number(day.new_contracts),
                format_number(day.total_calls),
                format_number(day.unique_wallets)
            ));
        }
    }

    lines.join("\n")
}

fn placeholder_note(report: &ContractAnalysis, field: &str) -> &'static str {
    if report.placeholder_fields.iter().any(|f| f == field) {
        " (sample data)"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_address() {
        let address = "0x7a250d5630b4cf539739df2c5dacb4c659f2488d";
        assert_eq!(format_address(address, true), "0x7a25...488d");
        assert_eq!(format_address(address, false), address);
        assert_eq!(format_address("", true), "-");
        assert_eq!(format_address("0xA", true), "0xA");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(22_000_000), "22,000,000");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(2.0), "2.00");
        assert_eq!(format_decimal(1234.567), "1,234.57");
        assert_eq!(format_decimal(0.0), "0.00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(1_680_307_200), "2023-04-01");
    }

    #[test]
    fn test_render_view_rows_in_order() {
        let records = vec![
            ContractRecord::new("0xB", 20, 4),
            ContractRecord::new("0xA", 10, 5),
        ];

        let table = render_view(&records, RankKey::TotalCalls, &TableOptions::default());
        let b = table.find("0xB").unwrap();
        let a = table.find("0xA").unwrap();

        assert!(table.starts_with("  MOST ACTIVE CONTRACTS"));
        assert!(b < a);
    }

    #[test]
    fn test_render_view_with_first_seen() {
        let records = vec![ContractRecord::new("0xA", 10, 5)];
        let options = TableOptions {
            short_addresses: true,
            first_seen: Some(vec![Some(Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap())]),
        };

        let table = render_view(&records, RankKey::Recency, &options);

        assert!(table.contains("First Seen"));
        assert!(table.contains("2025-02-03"));
    }

    #[test]
    fn test_render_empty_view() {
        let table = render_view(&[], RankKey::Recency, &TableOptions::default());
        assert!(table.contains("(no contracts)"));
    }
}
