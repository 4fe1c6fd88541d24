//! Pipeline — runs the chunk, extract, reconstruct and validate stages.

use legis_consolidate::{
    validate_dir, DataPolicy, OutputOptions, ReconstructionReport, Reconstructor, ValidationReport,
};
use legis_core::{Error, PipelineConfig, Result};
use legis_ingest::{ChunkReport, ExtractionReport, Ingester};
use tracing::{info, warn};

use crate::types::*;

/// Top-level pipeline bound to one configuration.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Stage: cleaned text → chunk files.
    pub fn chunk(&self) -> Result<ChunkReport> {
        Ingester::new(&self.config).chunk_document()
    }

    /// Stage: chunk files → one fact record per chunk.
    pub fn extract(&self) -> Result<ExtractionReport> {
        Ingester::new(&self.config).extract_chunks()
    }

    /// Stage: fact records → combined JSON and reconstructed text.
    pub fn reconstruct(&self, options: &OutputOptions) -> Result<ReconstructionReport> {
        Reconstructor::new(&self.config).run(options)
    }

    /// Stage: fact records → schema and data-presence report.
    pub fn validate(&self, policy: &DataPolicy) -> Result<ValidationReport> {
        info!(
            "Step: {} ({} required)",
            Stage::Validate.as_str(),
            policy.required.len()
        );
        validate_dir(&self.config.json_chunks_dir, policy)
    }

    /// Run chunk, extract and reconstruct in order.
    ///
    /// The input is checked up front so a missing file aborts before any
    /// stage runs.
    pub fn run_all(&self, options: &OutputOptions) -> Result<RunReport> {
        if !self.config.cleaned_file.exists() {
            return Err(Error::InputNotFound(self.config.cleaned_file.clone()));
        }
        self.config.data_paths().ensure_dirs()?;

        info!("Step 1: {}", Stage::Chunk.as_str());
        let chunk = self.chunk()?;
        info!("Step 2: {}", Stage::Extract.as_str());
        let extract = self.extract()?;
        info!("Step 3: {}", Stage::Reconstruct.as_str());
        let reconstruct = self.reconstruct(options)?;

        let report = RunReport {
            chunk,
            extract,
            reconstruct,
        };
        let failures = report.failures();
        if failures.is_empty() {
            info!("All processing complete");
        } else {
            for (stage, failure) in &failures {
                warn!("{} failed: {}", stage.as_str(), failure);
            }
            warn!("Processing complete with {} failures", failures.len());
        }
        Ok(report)
    }
}
