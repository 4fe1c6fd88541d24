//! Pipeline configuration and stage directory management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default maximum characters per chunk file.
pub const DEFAULT_MAX_CHARS: usize = 20_000;

/// How the cleaned document is partitioned into chunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkingStrategy {
    /// Accumulate lines up to `max_chars`.
    #[default]
    Size,
    /// Split on DIVISION / TITLE headers.
    Structure,
}

impl ChunkingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Structure => "structure",
        }
    }
}

impl fmt::Display for ChunkingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChunkingStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "size" => Ok(Self::Size),
            "structure" => Ok(Self::Structure),
            other => Err(Error::Config(format!(
                "unknown chunking strategy '{}' (expected 'size' or 'structure')",
                other
            ))),
        }
    }
}

/// Paths to the per-stage input and output locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    /// Cleaned document consumed by the chunker.
    pub cleaned_file: PathBuf,
    /// One text file per chunk (or part).
    pub chunks_dir: PathBuf,
    /// One fact record per chunk.
    pub json_chunks_dir: PathBuf,
    /// Combined JSON and reconstructed text.
    pub output_dir: PathBuf,
}

impl DataPaths {
    /// Create the stage output directories if needed.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.chunks_dir)?;
        std::fs::create_dir_all(&self.json_chunks_dir)?;
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }
}

/// Top-level pipeline configuration.
///
/// Passed by reference into each stage and never mutated there. Keys missing
/// from a persisted file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub cleaned_file: PathBuf,
    pub chunks_dir: PathBuf,
    pub json_chunks_dir: PathBuf,
    pub output_dir: PathBuf,
    pub max_chars: usize,
    pub chunking_strategy: ChunkingStrategy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cleaned_file: PathBuf::from("cleaned_output.txt"),
            chunks_dir: PathBuf::from("chunks"),
            json_chunks_dir: PathBuf::from("json_chunks"),
            output_dir: PathBuf::from("output"),
            max_chars: DEFAULT_MAX_CHARS,
            chunking_strategy: ChunkingStrategy::Size,
        }
    }
}

impl PipelineConfig {
    /// Load config from a JSON file, or return defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Persist config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(Error::Config("max_chars must be greater than 0".into()));
        }
        Ok(())
    }

    /// Apply `LEGIS_MAX_CHARS` / `LEGIS_CHUNKING_STRATEGY` from the environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        let max_chars = std::env::var("LEGIS_MAX_CHARS").ok();
        let strategy = std::env::var("LEGIS_CHUNKING_STRATEGY").ok();
        self.with_overrides(max_chars.as_deref(), strategy.as_deref())
    }

    /// Return a copy with the given textual overrides applied.
    pub fn with_overrides(mut self, max_chars: Option<&str>, strategy: Option<&str>) -> Result<Self> {
        if let Some(raw) = max_chars {
            self.max_chars = raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid max_chars: '{}'", raw)))?;
        }
        if let Some(raw) = strategy {
            self.chunking_strategy = raw.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn data_paths(&self) -> DataPaths {
        DataPaths {
            cleaned_file: self.cleaned_file.clone(),
            chunks_dir: self.chunks_dir.clone(),
            json_chunks_dir: self.json_chunks_dir.clone(),
            output_dir: self.output_dir.clone(),
        }
    }

    /// Re-root every relative path under `root`.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        let reroot = |p: PathBuf| if p.is_absolute() { p } else { root.join(p) };
        self.cleaned_file = reroot(self.cleaned_file);
        self.chunks_dir = reroot(self.chunks_dir);
        self.json_chunks_dir = reroot(self.json_chunks_dir);
        self.output_dir = reroot(self.output_dir);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_chars, 20_000);
        assert_eq!(config.chunking_strategy, ChunkingStrategy::Size);
    }

    #[test]
    fn test_zero_max_chars_rejected() {
        let config = PipelineConfig {
            max_chars: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_partial_file_merges_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"chunking_strategy": "structure", "max_chars": 500}"#).unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.chunking_strategy, ChunkingStrategy::Structure);
        assert_eq!(config.max_chars, 500);
        assert_eq!(config.chunks_dir, PathBuf::from("chunks"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(PipelineConfig::load(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");
        let config = PipelineConfig {
            max_chars: 1234,
            chunking_strategy: ChunkingStrategy::Structure,
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(PipelineConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_overrides() {
        let config = PipelineConfig::default()
            .with_overrides(Some("42"), Some("Structure"))
            .unwrap();
        assert_eq!(config.max_chars, 42);
        assert_eq!(config.chunking_strategy, ChunkingStrategy::Structure);

        assert!(PipelineConfig::default().with_overrides(Some("abc"), None).is_err());
        assert!(PipelineConfig::default().with_overrides(Some("0"), None).is_err());
        assert!(PipelineConfig::default().with_overrides(None, Some("pages")).is_err());
    }

    #[test]
    fn test_rooted_at() {
        let root = Path::new("/tmp/work");
        let config = PipelineConfig::default().rooted_at(root);
        assert_eq!(config.chunks_dir, root.join("chunks"));
        assert_eq!(config.cleaned_file, root.join("cleaned_output.txt"));
    }
}
