//! Aggregated record and output option types.

use std::path::PathBuf;

use legis_core::{ChunkingStrategy, UnitFailure};
use legis_ingest::extract::{Deadline, Duty, FundingEntry};
use legis_ingest::{FactRecord, References};
use serde::{Deserialize, Serialize};

/// Which outputs to produce and what to embed in the combined JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    pub create_text: bool,
    pub create_json: bool,
    /// Embed the per-chunk records in the combined JSON.
    pub include_chunks: bool,
    /// Embed the reconstructed full text in the combined JSON.
    pub include_full_text: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            create_text: true,
            create_json: true,
            include_chunks: false,
            include_full_text: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub total_chunks: usize,
    pub chunking_strategy: ChunkingStrategy,
}

/// Document-wide facts, same shape as a chunk's fact fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedData {
    pub references: References,
    pub funding: Vec<FundingEntry>,
    pub deadlines: Vec<Deadline>,
    pub duties_and_requirements: Vec<Duty>,
    pub programs_and_entities: Vec<String>,
    pub dates: Vec<String>,
    pub other_facts: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRecord {
    pub document_metadata: DocumentMetadata,
    pub aggregated_data: AggregatedData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks: Option<Vec<FactRecord>>,
}

/// Result of a reconstruction run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconstructionReport {
    pub records_loaded: usize,
    pub failures: Vec<UnitFailure>,
    pub json_path: Option<PathBuf>,
    pub text_path: Option<PathBuf>,
}
