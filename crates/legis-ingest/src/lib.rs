//! Legis Ingest — document chunking, chunk storage, heuristic fact extraction.

pub mod chunking;
pub mod extract;
pub mod file;
pub mod ingest;

pub use chunking::{Chunk, ChunkUnit, Chunker, SizeChunker, StructureChunker};
pub use extract::{extract_facts, FactRecord, References, REQUIRED_KEYS};
pub use file::UnitKey;
pub use ingest::{ChunkReport, ExtractionReport, Ingester};
