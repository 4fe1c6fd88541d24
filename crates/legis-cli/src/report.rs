//! Human-readable stage reports for the terminal.

use legis_consolidate::{ReconstructionReport, ValidationReport};
use legis_core::UnitFailure;
use legis_ingest::{ChunkReport, ExtractionReport};
use legis_runtime::RunReport;

fn print_failures(failures: &[UnitFailure]) {
    if failures.is_empty() {
        return;
    }
    println!();
    println!("Failures:");
    for f in failures {
        println!("  - {}", f);
    }
}

pub fn print_chunk_report(report: &ChunkReport) {
    println!("=== Chunking ===");
    println!("Strategy:           {}", report.strategy);
    println!("Chunks:             {}", report.chunks);
    println!("Files written:      {}", report.units_written);
    print_failures(&report.failures);
}

pub fn print_extraction_report(report: &ExtractionReport) {
    println!("=== Extraction ===");
    println!("Chunks processed:   {}", report.processed);
    println!("Records written:    {}", report.records_written.len());
    print_failures(&report.failures);
}

pub fn print_reconstruction_report(report: &ReconstructionReport) {
    println!("=== Reconstruction ===");
    println!("Records loaded:     {}", report.records_loaded);
    if let Some(path) = &report.json_path {
        println!("Combined JSON:      {}", path.display());
    }
    if let Some(path) = &report.text_path {
        println!("Reconstructed text: {}", path.display());
    }
    if report.records_loaded == 0 {
        println!("No fact records found; nothing written.");
    }
    print_failures(&report.failures);
}

pub fn print_run_report(report: &RunReport) {
    print_chunk_report(&report.chunk);
    println!();
    print_extraction_report(&report.extract);
    println!();
    print_reconstruction_report(&report.reconstruct);

    println!();
    let failed = report.failures().len();
    if failed == 0 {
        println!("Status: COMPLETE");
    } else {
        println!("Status: COMPLETE WITH {} FAILURES", failed);
    }
}

pub fn print_validation_report(report: &ValidationReport) {
    println!("Tested {} files.", report.tested);
    if report.all_passed() {
        println!("All JSON files passed the data presence test!");
        return;
    }
    println!("The following files had issues:");
    for f in &report.failures {
        println!("- {}", f);
    }
}
