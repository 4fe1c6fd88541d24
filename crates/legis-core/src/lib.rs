//! Legis Core — error type, pipeline configuration, stage directories.

pub mod config;
pub mod error;

pub use config::{ChunkingStrategy, DataPaths, PipelineConfig, DEFAULT_MAX_CHARS};
pub use error::{Error, Result, UnitFailure};
