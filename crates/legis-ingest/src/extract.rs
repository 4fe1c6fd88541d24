//! Heuristic legislative fact extraction.
//!
//! Each chunk is scanned once as a whole for statutory references, then line
//! by line by an ordered battery of recognizers (funding, dates, deadlines,
//! duties, entities). A line may feed several recognizers. Extraction is pure:
//! no state survives from one chunk to the next.

pub mod dates;
pub mod duties;
pub mod entities;
pub mod funding;
pub mod references;

use serde::{Deserialize, Serialize};

/// Top-level keys every persisted fact record must carry.
pub const REQUIRED_KEYS: &[&str] = &[
    "chunk_id",
    "references",
    "funding",
    "deadlines",
    "duties_and_requirements",
    "programs_and_entities",
    "dates",
    "other_facts",
];

/// Statutory citations found in a chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct References {
    #[serde(default)]
    pub us_code: Vec<String>,
    #[serde(default)]
    pub public_laws: Vec<String>,
    #[serde(default)]
    pub other_legislative_refs: Vec<String>,
}

impl References {
    pub fn is_empty(&self) -> bool {
        self.us_code.is_empty() && self.public_laws.is_empty() && self.other_legislative_refs.is_empty()
    }
}

/// One appropriation found on a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingEntry {
    pub amount: String,
    pub purpose: String,
    pub availability: String,
    /// Never populated by the base recognizers.
    pub fiscal_years: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub action: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duty {
    pub entity: String,
    pub action: String,
}

/// Structured facts for one chunk.
///
/// `original_text` is always set by extraction; it is dropped only from
/// aggregated chunk listings that do not carry the full text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactRecord {
    pub chunk_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(default)]
    pub references: References,
    #[serde(default)]
    pub funding: Vec<FundingEntry>,
    #[serde(default)]
    pub deadlines: Vec<Deadline>,
    #[serde(default)]
    pub duties_and_requirements: Vec<Duty>,
    #[serde(default)]
    pub programs_and_entities: Vec<String>,
    #[serde(default)]
    pub dates: Vec<String>,
    /// Extension point; always empty in the base pipeline.
    #[serde(default)]
    pub other_facts: Vec<serde_json::Value>,
}

impl FactRecord {
    fn new(chunk_id: &str, text: &str) -> Self {
        Self {
            chunk_id: chunk_id.to_string(),
            original_text: Some(text.to_string()),
            ..Default::default()
        }
    }
}

/// A recognizer applied to each trimmed, non-empty line of a chunk.
pub type LineRecognizer = fn(&str, &mut FactRecord);

/// Line recognizers in application order.
pub const LINE_RECOGNIZERS: &[(&str, LineRecognizer)] = &[
    ("funding", funding::recognize),
    ("dates", dates::recognize_dates),
    ("deadlines", dates::recognize_deadline),
    ("duties", duties::recognize),
    ("entities", entities::recognize),
];

/// Extract the fact record for one chunk's text.
pub fn extract_facts(chunk_id: &str, text: &str) -> FactRecord {
    let mut record = FactRecord::new(chunk_id, text);
    record.references = references::extract_references(text);

    for line in text.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        for (_, recognize) in LINE_RECOGNIZERS {
            recognize(line, &mut record);
        }
    }

    record
}

/// Drop repeated strings, keeping each one's first occurrence.
pub fn dedup_preserving_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

pub(crate) fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}
