//! Calendar dates and "not later than" deadlines.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{push_unique, Deadline, FactRecord};

/// `<Month> <day>, <year>`, month names in full.
pub const DATE_PATTERN: &str = r"(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},\s*\d{4}";

pub(crate) static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("(?i){}", DATE_PATTERN)).expect("valid date regex"));

static NOT_LATER_THAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)not later than\s+(?P<date>{})", DATE_PATTERN))
        .expect("valid deadline regex")
});

/// Placeholder action; the verb phrase before the deadline is not parsed.
pub const UNKNOWN_ACTION: &str = "unknown action";

/// All date strings on a line, in order of appearance.
pub fn find_dates(line: &str) -> Vec<&str> {
    DATE_RE.find_iter(line).map(|m| m.as_str()).collect()
}

/// The first "not later than <date>" deadline on a line.
pub fn find_deadline(line: &str) -> Option<Deadline> {
    let caps = NOT_LATER_THAN_RE.captures(line)?;
    Some(Deadline {
        action: UNKNOWN_ACTION.to_string(),
        date: caps["date"].to_string(),
    })
}

pub fn recognize_dates(line: &str, record: &mut FactRecord) {
    for date in find_dates(line) {
        push_unique(&mut record.dates, date);
    }
}

pub fn recognize_deadline(line: &str, record: &mut FactRecord) {
    if let Some(deadline) = find_deadline(line) {
        record.deadlines.push(deadline);
    }
}
