//! Dollar appropriations: amount, purpose and availability.

use once_cell::sync::Lazy;
use regex::Regex;

use super::dates::DATE_RE;
use super::{FactRecord, FundingEntry};

// The amount anchors the entry; purpose and availability are read from the
// rest of the line after it.
static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(?P<amount>[0-9,]+)").expect("valid amount regex"));

// Numerals end the phrase, so an availability date is cut at its day.
static PURPOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bfor\s+([A-Za-z,\-\s]+)").expect("valid purpose regex"));

pub const UNSPECIFIED_PURPOSE: &str = "unspecified";
pub const UNSPECIFIED_EXTENDED_AVAILABILITY: &str = "unspecified extended availability";
pub const AVAILABILITY_NOT_SPECIFIED: &str = "not specified";

/// Parse the first dollar amount on a line into a funding entry.
pub fn parse_funding(line: &str) -> Option<FundingEntry> {
    let caps = AMOUNT_RE.captures(line)?;
    let amount = caps.name("amount")?;
    let remainder = &line[amount.end()..];

    let availability = if remainder.to_lowercase().contains("until") {
        DATE_RE
            .find(remainder)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| UNSPECIFIED_EXTENDED_AVAILABILITY.to_string())
    } else {
        AVAILABILITY_NOT_SPECIFIED.to_string()
    };

    let purpose = PURPOSE_RE
        .captures(remainder)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|p| !p.is_empty())
        .unwrap_or(UNSPECIFIED_PURPOSE)
        .to_string();

    Some(FundingEntry {
        amount: format!("${}", amount.as_str()),
        purpose,
        availability,
        fiscal_years: Vec::new(),
    })
}

pub fn recognize(line: &str, record: &mut FactRecord) {
    if let Some(entry) = parse_funding(line) {
        record.funding.push(entry);
    }
}
