//! Runtime types.

use legis_consolidate::ReconstructionReport;
use legis_core::UnitFailure;
use legis_ingest::{ChunkReport, ExtractionReport};
use serde::Serialize;

/// Pipeline stage that can be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Cleaned text → chunk files.
    Chunk,
    /// Chunk files → fact records.
    Extract,
    /// Fact records → combined JSON and reconstructed text.
    Reconstruct,
    /// Fact records → schema report.
    Validate,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chunk => "chunk",
            Self::Extract => "extract",
            Self::Reconstruct => "reconstruct",
            Self::Validate => "validate",
        }
    }
}

/// Combined result of a full pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub chunk: ChunkReport,
    pub extract: ExtractionReport,
    pub reconstruct: ReconstructionReport,
}

impl RunReport {
    /// Every per-unit failure across the run, tagged with its stage.
    pub fn failures(&self) -> Vec<(Stage, &UnitFailure)> {
        let stages = [
            (Stage::Chunk, &self.chunk.failures),
            (Stage::Extract, &self.extract.failures),
            (Stage::Reconstruct, &self.reconstruct.failures),
        ];
        let mut all = Vec::new();
        for (stage, list) in stages {
            all.extend(list.iter().map(|f| (stage, f)));
        }
        all
    }
}
