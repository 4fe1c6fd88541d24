//! Programs and government entities named by a fixed head-noun vocabulary.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{push_unique, FactRecord};

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:Department of [A-Za-z&\s]+|Office of [A-Za-z&\s]+|Administration|Agency|Commission|Authority|Bureau|Inspector General)\b",
    )
    .expect("valid entity regex")
});

/// Entity names on a line, trimmed, in order of appearance.
pub fn find_entities(line: &str) -> Vec<String> {
    ENTITY_RE
        .find_iter(line)
        .map(|m| m.as_str().trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

pub fn recognize(line: &str, record: &mut FactRecord) {
    for entity in find_entities(line) {
        push_unique(&mut record.programs_and_entities, &entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_entities() {
        let line = "the Department of Energy, the Small Business Administration, and the Bureau";
        assert_eq!(
            find_entities(line),
            vec!["Department of Energy", "Administration", "Bureau"]
        );
    }

    #[test]
    fn test_office_of_runs_to_punctuation() {
        let line = "transferred to the Office of Inspector General; the Commission";
        assert_eq!(
            find_entities(line),
            vec!["Office of Inspector General", "Commission"]
        );
    }

    #[test]
    fn test_entities_dedup_first_seen() {
        let mut record = FactRecord::default();
        recognize("the Agency and the Authority", &mut record);
        recognize("the Authority, the Agency, the Bureau", &mut record);
        assert_eq!(record.programs_and_entities, vec!["Agency", "Authority", "Bureau"]);
    }

    #[test]
    fn test_no_partial_words() {
        assert!(find_entities("Agencywide authorityless").is_empty());
    }
}
