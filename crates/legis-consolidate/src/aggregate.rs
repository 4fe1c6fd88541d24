//! Merge per-chunk fact records and write the combined outputs.

use std::collections::BTreeSet;
use std::path::Path;

use legis_core::{ChunkingStrategy, PipelineConfig, Result, UnitFailure};
use legis_ingest::extract::dedup_preserving_order;
use legis_ingest::file::list_units;
use legis_ingest::{FactRecord, UnitKey};
use tracing::{info, warn};

use crate::types::*;

pub const COMBINED_JSON_FILE: &str = "combined_document.json";
pub const RECONSTRUCTED_TEXT_FILE: &str = "reconstructed_document.txt";

/// Merge fact records, given in chunk sequence order, into one document record.
///
/// References are concatenated then deduplicated in first-seen order.
/// Funding, deadlines, duties, dates and other facts are concatenated as-is.
/// Programs and entities are a set union; their order carries no meaning.
pub fn aggregate(
    records: &[FactRecord],
    strategy: ChunkingStrategy,
    options: &OutputOptions,
) -> AggregatedRecord {
    let mut data = AggregatedData::default();
    let mut entities = BTreeSet::new();

    for record in records {
        let refs = &record.references;
        data.references.us_code.extend(refs.us_code.iter().cloned());
        data.references.public_laws.extend(refs.public_laws.iter().cloned());
        data.references
            .other_legislative_refs
            .extend(refs.other_legislative_refs.iter().cloned());

        data.funding.extend(record.funding.iter().cloned());
        data.deadlines.extend(record.deadlines.iter().cloned());
        data.duties_and_requirements
            .extend(record.duties_and_requirements.iter().cloned());
        data.dates.extend(record.dates.iter().cloned());
        data.other_facts.extend(record.other_facts.iter().cloned());

        entities.extend(record.programs_and_entities.iter().cloned());
    }

    let refs = std::mem::take(&mut data.references);
    data.references.us_code = dedup_preserving_order(refs.us_code);
    data.references.public_laws = dedup_preserving_order(refs.public_laws);
    data.references.other_legislative_refs = dedup_preserving_order(refs.other_legislative_refs);
    data.programs_and_entities = entities.into_iter().collect();

    let full_text = options.include_full_text.then(|| reconstruct_text(records));

    let chunks = options.include_chunks.then(|| {
        records
            .iter()
            .cloned()
            .map(|mut r| {
                if !options.include_full_text {
                    r.original_text = None;
                }
                r
            })
            .collect()
    });

    AggregatedRecord {
        document_metadata: DocumentMetadata {
            total_chunks: records.len(),
            chunking_strategy: strategy,
        },
        aggregated_data: data,
        full_text,
        chunks,
    }
}

/// Rebuild the document text from records in chunk order.
///
/// Chunks are joined with a newline. Parts of one chunk are byte slices of
/// its text, so consecutive parts sharing a sequence number join directly.
pub fn reconstruct_text(records: &[FactRecord]) -> String {
    let mut text = String::new();
    let mut previous: Option<UnitKey> = None;

    for record in records {
        let Some(body) = record.original_text.as_deref() else {
            continue;
        };
        let key = UnitKey::parse(&record.chunk_id);
        if let Some(prev) = &previous {
            let same_chunk = key.part.is_some()
                && prev.part.is_some()
                && key.sequence_number.is_some()
                && key.sequence_number == prev.sequence_number;
            if !same_chunk {
                text.push('\n');
            }
        }
        text.push_str(body);
        previous = Some(key);
    }

    text
}

/// Load every `.json` fact record in `dir`, in chunk order.
///
/// Files that cannot be read or parsed are skipped and returned as failures.
pub fn load_fact_records(dir: &Path) -> Result<(Vec<FactRecord>, Vec<UnitFailure>)> {
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for (key, path) in list_units(dir, "json")? {
        let loaded = std::fs::read_to_string(&path)
            .map_err(legis_core::Error::from)
            .and_then(|s| serde_json::from_str::<FactRecord>(&s).map_err(Into::into));
        match loaded {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Error processing {}: {}", path.display(), e);
                failures.push(UnitFailure::new(key.stem, e));
            }
        }
    }

    Ok((records, failures))
}

/// Rebuilds the document-level outputs from the fact directory.
pub struct Reconstructor<'a> {
    config: &'a PipelineConfig,
}

impl<'a> Reconstructor<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    /// Load all fact records, merge them, and write the requested outputs.
    pub fn run(&self, options: &OutputOptions) -> Result<ReconstructionReport> {
        let (records, failures) = load_fact_records(&self.config.json_chunks_dir)?;
        let mut report = ReconstructionReport {
            records_loaded: records.len(),
            failures,
            ..Default::default()
        };

        if records.is_empty() {
            warn!(
                "No fact records found in {}",
                self.config.json_chunks_dir.display()
            );
            return Ok(report);
        }

        info!("Processing {} chunk records", records.len());
        let combined = aggregate(&records, self.config.chunking_strategy, options);
        std::fs::create_dir_all(&self.config.output_dir)?;

        if options.create_json {
            let path = self.config.output_dir.join(COMBINED_JSON_FILE);
            std::fs::write(&path, serde_json::to_string_pretty(&combined)?)?;
            info!("Wrote combined JSON to {}", path.display());
            report.json_path = Some(path);
        }

        if options.create_text {
            let path = self.config.output_dir.join(RECONSTRUCTED_TEXT_FILE);
            let text = match &combined.full_text {
                Some(full) => full.clone(),
                None => reconstruct_text(&records),
            };
            std::fs::write(&path, text)?;
            info!("Wrote reconstructed text to {}", path.display());
            report.text_path = Some(path);
        }

        Ok(report)
    }
}
