//! Consolidation — merge per-chunk fact records into one document record.
//!
//! Also reconstructs the cleaned text from chunk records and validates fact
//! files against the required key schema.

pub mod aggregate;
pub mod types;
pub mod validate;

pub use aggregate::{aggregate, load_fact_records, Reconstructor};
pub use types::*;
pub use validate::{validate_dir, validate_record, DataPolicy, FactCategory, ValidationReport};
