//! Chunk and fact file storage.
//!
//! Every chunk (or part) is one `.txt` file whose stem encodes
//! `(sequence_number, division?, title?, part?)`; every fact record is one
//! `.json` file with the same stem. Readers recover document order by sorting
//! on [`UnitKey`].

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use legis_core::{Error, Result, UnitFailure};
use tracing::{debug, warn};

use crate::chunking::Chunk;

/// Read the cleaned input as lines with trailing whitespace removed.
///
/// A missing input is reported before any chunk is produced.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(content.lines().map(|l| l.trim_end().to_string()).collect())
}

/// Outcome of writing a chunk set to storage.
#[derive(Debug, Default)]
pub struct EmitReport {
    pub chunks: usize,
    pub units_written: Vec<PathBuf>,
    pub failures: Vec<UnitFailure>,
}

/// Write each chunk as one file, or as numbered parts when over `max_chars`.
///
/// Writes are independent: a failed unit is reported and the rest continue.
pub fn write_chunks(dir: &Path, chunks: &[Chunk], max_chars: usize) -> EmitReport {
    let mut report = EmitReport {
        chunks: chunks.len(),
        ..Default::default()
    };

    for chunk in chunks {
        for unit in chunk.units(max_chars) {
            let path = dir.join(format!("{}.txt", unit.name));
            match std::fs::write(&path, unit.text) {
                Ok(()) => {
                    debug!("Wrote {} ({} bytes)", path.display(), unit.text.len());
                    report.units_written.push(path);
                }
                Err(e) => {
                    warn!("Failed to write chunk unit {}: {}", unit.name, e);
                    report.failures.push(UnitFailure::new(unit.name, e));
                }
            }
        }
    }

    report
}

/// Ordering key parsed from a chunk or fact file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitKey {
    pub sequence_number: Option<usize>,
    pub part: Option<usize>,
    pub stem: String,
}

impl UnitKey {
    /// Parse `003_division_a_part2` into sequence 3, part 2.
    pub fn parse(stem: &str) -> Self {
        let sequence_number = stem.split('_').next().and_then(|n| n.parse().ok());
        let part = stem
            .rsplit('_')
            .next()
            .and_then(|last| last.strip_prefix("part"))
            .and_then(|n| n.parse().ok());
        Self {
            sequence_number,
            part,
            stem: stem.to_string(),
        }
    }
}

impl Ord for UnitKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Stems without a sequence number sort after all numbered ones.
        let seq = |k: &Self| k.sequence_number.map_or((1, 0), |n| (0, n));
        seq(self)
            .cmp(&seq(other))
            .then(self.part.unwrap_or(0).cmp(&other.part.unwrap_or(0)))
            .then_with(|| self.stem.cmp(&other.stem))
    }
}

impl PartialOrd for UnitKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// List files with the given extension in document order.
pub fn list_units(dir: &Path, extension: &str) -> Result<Vec<(UnitKey, PathBuf)>> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut units = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!("Skipping non UTF-8 file name: {}", path.display());
            continue;
        };
        units.push((UnitKey::parse(stem), path));
    }
    units.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(units)
}

/// Delete every file with the given extension left in `dir` by an earlier run.
///
/// A file that cannot be removed is reported and the rest are still removed.
pub fn remove_units(dir: &Path, extension: &str) -> Result<Vec<UnitFailure>> {
    let mut failures = Vec::new();
    for (key, path) in list_units(dir, extension)? {
        match std::fs::remove_file(&path) {
            Ok(()) => debug!("Removed stale {}", path.display()),
            Err(e) => {
                warn!("Failed to remove stale {}: {}", path.display(), e);
                failures.push(UnitFailure::new(key.stem, e));
            }
        }
    }
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_lines_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("cleaned_output.txt");
        assert!(matches!(read_lines(&missing), Err(Error::InputNotFound(p)) if p == missing));
    }

    #[test]
    fn test_read_lines_trims_trailing_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "one  \r\n  two\t\n\nthree").unwrap();
        assert_eq!(read_lines(&path).unwrap(), vec!["one", "  two", "", "three"]);
    }

    #[test]
    fn test_unit_key_parse() {
        let key = UnitKey::parse("012_division_b_title_iii_part4");
        assert_eq!(key.sequence_number, Some(12));
        assert_eq!(key.part, Some(4));

        let key = UnitKey::parse("003");
        assert_eq!(key.sequence_number, Some(3));
        assert_eq!(key.part, None);

        let key = UnitKey::parse("notes");
        assert_eq!(key.sequence_number, None);
    }

    #[test]
    fn test_unit_key_order() {
        let mut keys: Vec<UnitKey> = ["notes", "010", "002_part10", "002_part2", "001_title_i", "1000"]
            .iter()
            .map(|s| UnitKey::parse(s))
            .collect();
        keys.sort();
        let stems: Vec<&str> = keys.iter().map(|k| k.stem.as_str()).collect();
        assert_eq!(
            stems,
            vec!["001_title_i", "002_part2", "002_part10", "010", "1000", "notes"]
        );
    }

    #[test]
    fn test_write_chunks_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let chunks = vec![
            Chunk {
                sequence_number: 1,
                division: None,
                title: Some("I".into()),
                text: "TITLE I\nshort".into(),
            },
            Chunk {
                sequence_number: 2,
                division: Some("A".into()),
                title: None,
                text: "x".repeat(25),
            },
        ];

        let report = write_chunks(dir.path(), &chunks, 10);
        assert_eq!(report.chunks, 2);
        assert!(report.failures.is_empty());
        assert_eq!(report.units_written.len(), 1 + 3);

        let listed = list_units(dir.path(), "txt").unwrap();
        let stems: Vec<&str> = listed.iter().map(|(k, _)| k.stem.as_str()).collect();
        assert_eq!(
            stems,
            vec![
                "001_title_i",
                "002_division_a_part1",
                "002_division_a_part2",
                "002_division_a_part3",
            ]
        );
        let last = std::fs::read_to_string(&listed[3].1).unwrap();
        assert_eq!(last, "xxxxx");
    }

    #[test]
    fn test_write_failure_does_not_stop_others() {
        let dir = tempfile::tempdir().unwrap();
        // A directory occupying the target path makes that one write fail.
        std::fs::create_dir(dir.path().join("001.txt")).unwrap();
        let chunks = vec![
            Chunk {
                sequence_number: 1,
                division: None,
                title: None,
                text: "a".into(),
            },
            Chunk {
                sequence_number: 2,
                division: None,
                title: None,
                text: "b".into(),
            },
        ];

        let report = write_chunks(dir.path(), &chunks, 100);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].unit, "001");
        assert_eq!(report.units_written, vec![dir.path().join("002.txt")]);
    }

    #[test]
    fn test_remove_units_only_matching_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("001.txt"), "a").unwrap();
        std::fs::write(dir.path().join("002_part1.txt"), "b").unwrap();
        std::fs::write(dir.path().join("001.json"), "{}").unwrap();

        let failures = remove_units(dir.path(), "txt").unwrap();
        assert!(failures.is_empty());
        assert!(list_units(dir.path(), "txt").unwrap().is_empty());
        assert!(dir.path().join("001.json").exists());
    }

    #[test]
    fn test_list_units_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            list_units(&dir.path().join("nope"), "txt"),
            Err(Error::DirectoryNotFound(_))
        ));
    }
}
