//! Schema and data-presence checks over persisted fact records.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use legis_core::{Error, Result, UnitFailure};
use legis_ingest::file::list_units;
use legis_ingest::REQUIRED_KEYS;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

const REFERENCE_KEYS: &[&str] = &["us_code", "public_laws", "other_legislative_refs"];

/// A fact category a policy can demand data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactCategory {
    References,
    Funding,
    Dates,
    DutiesAndRequirements,
    ProgramsAndEntities,
    Deadlines,
    OtherFacts,
}

impl FactCategory {
    pub const ALL: [FactCategory; 7] = [
        Self::References,
        Self::Funding,
        Self::Dates,
        Self::DutiesAndRequirements,
        Self::ProgramsAndEntities,
        Self::Deadlines,
        Self::OtherFacts,
    ];

    /// The record key holding this category.
    pub fn key(&self) -> &'static str {
        match self {
            Self::References => "references",
            Self::Funding => "funding",
            Self::Dates => "dates",
            Self::DutiesAndRequirements => "duties_and_requirements",
            Self::ProgramsAndEntities => "programs_and_entities",
            Self::Deadlines => "deadlines",
            Self::OtherFacts => "other_facts",
        }
    }

    fn has_data(&self, record: &Value) -> bool {
        match self {
            Self::References => REFERENCE_KEYS
                .iter()
                .any(|k| non_empty_array(&record["references"][*k])),
            other => non_empty_array(&record[other.key()]),
        }
    }
}

impl fmt::Display for FactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FactCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| Error::Config(format!("Unknown fact category: {}", s)))
    }
}

fn non_empty_array(value: &Value) -> bool {
    value.as_array().is_some_and(|a| !a.is_empty())
}

/// Categories that must hold at least one entry in every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPolicy {
    pub required: Vec<FactCategory>,
}

impl Default for DataPolicy {
    fn default() -> Self {
        Self {
            required: vec![FactCategory::References],
        }
    }
}

impl DataPolicy {
    pub fn requires(&self, category: FactCategory) -> bool {
        self.required.contains(&category)
    }
}

/// Check one parsed record: required keys first, then the data policy.
pub fn validate_record(record: &Value, policy: &DataPolicy) -> Result<()> {
    let Some(object) = record.as_object() else {
        return Err(Error::Schema("Record is not a JSON object".into()));
    };

    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|k| !object.contains_key(*k))
        .collect();
    if !missing.is_empty() {
        return Err(Error::Schema(format!(
            "Missing expected keys: {}",
            missing.join(", ")
        )));
    }

    let missing_refs: Vec<&str> = REFERENCE_KEYS
        .iter()
        .copied()
        .filter(|k| record["references"].get(*k).is_none())
        .collect();
    if !missing_refs.is_empty() {
        return Err(Error::Schema(format!(
            "Missing expected reference keys: {}",
            missing_refs.join(", ")
        )));
    }

    if policy.requires(FactCategory::References) && !FactCategory::References.has_data(record) {
        return Err(Error::Schema(
            "No references found, but references are required.".into(),
        ));
    }

    for category in FactCategory::ALL.iter().skip(1) {
        if policy.requires(*category) && !category.has_data(record) {
            return Err(Error::Schema(format!(
                "Expected {} to have data, but it's empty.",
                category
            )));
        }
    }

    if !policy.requires(FactCategory::References)
        && !FactCategory::ALL.iter().any(|c| c.has_data(record))
    {
        return Err(Error::Schema(
            "No meaningful data found in any category.".into(),
        ));
    }

    Ok(())
}

/// Outcome of validating a fact directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub tested: usize,
    pub passed: usize,
    pub failures: Vec<UnitFailure>,
}

impl ValidationReport {
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Validate every `.json` fact file in `dir`.
pub fn validate_dir(dir: &Path, policy: &DataPolicy) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();

    for (key, path) in list_units(dir, "json")? {
        report.tested += 1;
        let outcome = std::fs::read_to_string(&path)
            .map_err(Error::from)
            .and_then(|s| serde_json::from_str::<Value>(&s).map_err(Error::from))
            .and_then(|value| validate_record(&value, policy));

        match outcome {
            Ok(()) => {
                debug!("{} passed", key.stem);
                report.passed += 1;
            }
            Err(e) => {
                warn!("{} failed validation: {}", key.stem, e);
                report.failures.push(UnitFailure::new(key.stem, e));
            }
        }
    }

    info!(
        "Validated {} files in {}: {} passed, {} failed",
        report.tested,
        dir.display(),
        report.passed,
        report.failures.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use legis_ingest::extract_facts;
    use serde_json::json;

    fn empty_record() -> Value {
        serde_json::to_value(extract_facts("001", "")).unwrap()
    }

    fn schema_message(result: Result<()>) -> String {
        match result {
            Err(Error::Schema(msg)) => msg,
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            "duties_and_requirements".parse::<FactCategory>().unwrap(),
            FactCategory::DutiesAndRequirements
        );
        assert_eq!(" Funding ".parse::<FactCategory>().unwrap(), FactCategory::Funding);
        assert!("budgets".parse::<FactCategory>().is_err());
    }

    #[test]
    fn test_missing_keys_listed() {
        let record = json!({"chunk_id": "001", "references": {}, "funding": []});
        let msg = schema_message(validate_record(&record, &DataPolicy::default()));
        assert_eq!(
            msg,
            "Missing expected keys: deadlines, duties_and_requirements, programs_and_entities, dates, other_facts"
        );
    }

    #[test]
    fn test_missing_reference_subkey() {
        let mut record = empty_record();
        record["references"] = json!({"us_code": []});
        let msg = schema_message(validate_record(&record, &DataPolicy::default()));
        assert!(msg.contains("public_laws"));
    }

    #[test]
    fn test_references_required_by_default() {
        let msg = schema_message(validate_record(&empty_record(), &DataPolicy::default()));
        assert_eq!(msg, "No references found, but references are required.");

        let record = serde_json::to_value(extract_facts("001", "See Public Law 118-5.")).unwrap();
        assert!(validate_record(&record, &DataPolicy::default()).is_ok());
    }

    #[test]
    fn test_required_category_empty() {
        let record = serde_json::to_value(extract_facts("001", "See 5 U.S.C. 552.")).unwrap();
        let policy = DataPolicy {
            required: vec![FactCategory::References, FactCategory::Funding],
        };
        let msg = schema_message(validate_record(&record, &policy));
        assert_eq!(msg, "Expected funding to have data, but it's empty.");
    }

    #[test]
    fn test_no_meaningful_data() {
        let policy = DataPolicy { required: vec![] };
        let msg = schema_message(validate_record(&empty_record(), &policy));
        assert_eq!(msg, "No meaningful data found in any category.");

        let record = serde_json::to_value(extract_facts("001", "The Agency")).unwrap();
        assert!(validate_record(&record, &policy).is_ok());
    }

    #[test]
    fn test_validate_dir_reports() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, body: String| std::fs::write(dir.path().join(name), body).unwrap();
        write(
            "001.json",
            serde_json::to_string(&extract_facts("001", "Under 42 U.S.C. 1983")).unwrap(),
        );
        write(
            "002.json",
            serde_json::to_string(&extract_facts("002", "no facts here")).unwrap(),
        );
        write("003.json", "not json".into());
        write("notes.txt", "ignored".into());

        let report = validate_dir(dir.path(), &DataPolicy::default()).unwrap();
        assert_eq!(report.tested, 3);
        assert_eq!(report.passed, 1);
        assert!(!report.all_passed());
        let units: Vec<&str> = report.failures.iter().map(|f| f.unit.as_str()).collect();
        assert_eq!(units, vec!["002", "003"]);
        assert!(report.failures[1].reason.starts_with("JSON error"));
    }
}
