//! Duties and requirements imposed on named officials.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Duty, FactRecord};

static DUTY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?P<entity>The Secretary of [A-Za-z&\s]+|The Secretary|The Administrator|The Comptroller General of the United States|The Director)\s+(?:shall|may|must)\s+(?P<action>.*)",
    )
    .expect("valid duty regex")
});

/// The first `<official> shall|may|must <action>` clause on a line.
pub fn find_duty(line: &str) -> Option<Duty> {
    let caps = DUTY_RE.captures(line)?;
    Some(Duty {
        entity: caps["entity"].trim().to_string(),
        action: caps["action"].trim().to_string(),
    })
}

pub fn recognize(line: &str, record: &mut FactRecord) {
    if let Some(duty) = find_duty(line) {
        record.duties_and_requirements.push(duty);
    }
}
