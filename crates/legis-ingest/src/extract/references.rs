//! Statutory reference recognition over a whole chunk.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{dedup_preserving_order, References};

static US_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d+\s*U\.S\.C\.?\s*[\w().\-]*").expect("valid U.S.C. regex")
});

// Accepts the typeset en dash as well as a plain hyphen.
static PUBLIC_LAW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Public Law \d+[–-]\d+").expect("valid public law regex"));

// Two or more capitalized words followed by "Act" or "Code".
static NAMED_ACT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:[A-Z][a-zA-Z.]* ){2,}(?:Act|Code)\b").expect("valid named act regex")
});

/// Find U.S. Code citations, public laws and named acts in `text`.
///
/// Each category is deduplicated; callers must not rely on its order.
pub fn extract_references(text: &str) -> References {
    let find = |re: &Regex| dedup_preserving_order(re.find_iter(text).map(|m| m.as_str().to_string()));

    References {
        us_code: find(&US_CODE_RE),
        public_laws: find(&PUBLIC_LAW_RE),
        other_legislative_refs: find(&NAMED_ACT_RE),
    }
}
