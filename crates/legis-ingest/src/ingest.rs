//! Chunk and extract stages: cleaned file → chunk files → fact records.

use std::path::{Path, PathBuf};

use legis_core::{ChunkingStrategy, PipelineConfig, Result, UnitFailure};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::chunking::Chunker;
use crate::extract::{extract_facts, FactRecord};
use crate::file;

/// Summary of one chunking run.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkReport {
    pub strategy: ChunkingStrategy,
    pub chunks: usize,
    pub units_written: usize,
    pub failures: Vec<UnitFailure>,
}

/// Summary of one extraction run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    pub processed: usize,
    pub records_written: Vec<PathBuf>,
    pub failures: Vec<UnitFailure>,
}

/// Runs the chunking and extraction stages for one configuration.
pub struct Ingester<'a> {
    config: &'a PipelineConfig,
}

impl<'a> Ingester<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    /// Chunk the cleaned input file into the chunks directory.
    ///
    /// A missing input fails before anything is written. Chunk files from an
    /// earlier run are removed first.
    pub fn chunk_document(&self) -> Result<ChunkReport> {
        self.config.validate()?;
        let lines = file::read_lines(&self.config.cleaned_file)?;
        std::fs::create_dir_all(&self.config.chunks_dir)?;
        let mut failures = file::remove_units(&self.config.chunks_dir, "txt")?;

        let strategy = self.config.chunking_strategy;
        let chunker = Chunker::from_config(self.config);
        match strategy {
            ChunkingStrategy::Size => info!(
                "Using size-based chunking (max {} chars) on {} lines",
                self.config.max_chars,
                lines.len()
            ),
            ChunkingStrategy::Structure => {
                info!("Using structure-based chunking on {} lines", lines.len())
            }
        }

        let chunks = chunker.chunk(&lines);
        let emitted = file::write_chunks(&self.config.chunks_dir, &chunks, chunker.part_bound());
        failures.extend(emitted.failures);

        info!(
            "Chunking complete: {} chunks, {} files in {} ({} failed)",
            emitted.chunks,
            emitted.units_written.len(),
            self.config.chunks_dir.display(),
            failures.len()
        );

        Ok(ChunkReport {
            strategy,
            chunks: emitted.chunks,
            units_written: emitted.units_written.len(),
            failures,
        })
    }

    /// Extract a fact record from every chunk file, one JSON file each.
    ///
    /// Fact records from an earlier run are removed first. Unreadable chunks
    /// and failed writes are reported and skipped.
    pub fn extract_chunks(&self) -> Result<ExtractionReport> {
        let units = file::list_units(&self.config.chunks_dir, "txt")?;
        std::fs::create_dir_all(&self.config.json_chunks_dir)?;

        let mut report = ExtractionReport {
            failures: file::remove_units(&self.config.json_chunks_dir, "json")?,
            ..Default::default()
        };
        for (key, path) in units {
            let text = match std::fs::read_to_string(&path) {
                Ok(t) => t,
                Err(e) => {
                    warn!("Skipping unreadable chunk {}: {}", path.display(), e);
                    report.failures.push(UnitFailure::new(key.stem, e));
                    continue;
                }
            };

            let record = extract_facts(&key.stem, &text);
            report.processed += 1;
            match write_fact_record(&self.config.json_chunks_dir, &record) {
                Ok(out) => {
                    debug!("Extracted {} -> {}", key.stem, out.display());
                    report.records_written.push(out);
                }
                Err(e) => {
                    warn!("Failed to write facts for {}: {}", key.stem, e);
                    report.failures.push(UnitFailure::new(key.stem, e));
                }
            }
        }

        info!(
            "Extraction complete: {} chunks processed, {} records in {} ({} failed)",
            report.processed,
            report.records_written.len(),
            self.config.json_chunks_dir.display(),
            report.failures.len()
        );
        Ok(report)
    }
}

/// Write a fact record as `<chunk_id>.json`.
pub fn write_fact_record(dir: &Path, record: &FactRecord) -> Result<PathBuf> {
    let path = dir.join(format!("{}.json", record.chunk_id));
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(&path, json)?;
    Ok(path)
}
