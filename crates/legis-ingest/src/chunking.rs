//! Document chunking — size-bounded and DIVISION/TITLE structure-based.
//!
//! Both strategies consume an already-cleaned line sequence and emit chunks in
//! document order with 1-based sequence numbers. Oversized chunks are split
//! into byte-bounded parts only when they are emitted to storage.

use legis_core::{ChunkingStrategy, PipelineConfig, DEFAULT_MAX_CHARS};
use once_cell::sync::Lazy;
use regex::Regex;

static DIVISION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^DIVISION\s+([A-Z]+)\b").expect("valid division regex"));
static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^TITLE\s+([IVXLC]+)\b").expect("valid title regex"));

/// A contiguous, ordered slice of the cleaned document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub sequence_number: usize,
    pub division: Option<String>,
    pub title: Option<String>,
    pub text: String,
}

/// One storage unit of a chunk: the whole chunk, or one numbered part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkUnit<'a> {
    /// File stem encoding sequence number, labels and part number.
    pub name: String,
    pub part: Option<usize>,
    pub text: &'a str,
}

impl Chunk {
    /// File stem without part suffix, e.g. `002_division_a_title_iv`.
    pub fn file_stem(&self) -> String {
        let mut stem = format!("{:03}", self.sequence_number);
        if let Some(division) = &self.division {
            stem.push_str("_division_");
            stem.push_str(&division.to_lowercase());
        }
        if let Some(title) = &self.title {
            stem.push_str("_title_");
            stem.push_str(&title.to_lowercase());
        }
        stem
    }

    /// Storage units for this chunk under the given size bound.
    pub fn units(&self, max_chars: usize) -> Vec<ChunkUnit<'_>> {
        let stem = self.file_stem();
        if self.text.len() <= max_chars {
            return vec![ChunkUnit {
                name: stem,
                part: None,
                text: &self.text,
            }];
        }

        split_parts(&self.text, max_chars)
            .into_iter()
            .enumerate()
            .map(|(i, text)| ChunkUnit {
                name: format!("{}_part{}", stem, i + 1),
                part: Some(i + 1),
                text,
            })
            .collect()
    }
}

/// Split text into successive slices of at most `max_bytes` bytes.
///
/// Slices are not line-aligned. A boundary that would fall inside a UTF-8
/// character moves back to the start of that character; a bound narrower than
/// one character still advances by a whole character.
pub fn split_parts(text: &str, max_bytes: usize) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + max_bytes).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            end = start + 1;
            while !text.is_char_boundary(end) {
                end += 1;
            }
        }
        parts.push(&text[start..end]);
        start = end;
    }
    parts
}

/// Running chunk state shared by both strategies.
#[derive(Default)]
struct Accumulator {
    lines: Vec<String>,
    size: usize,
    emitted: Vec<Chunk>,
}

impl Accumulator {
    fn push(&mut self, line: String) {
        self.size += line.len() + 1;
        self.lines.push(line);
    }

    fn is_open(&self) -> bool {
        !self.lines.is_empty()
    }

    fn close(&mut self, division: Option<&str>, title: Option<&str>) {
        if self.lines.is_empty() {
            return;
        }
        let text = self.lines.join("\n");
        self.lines.clear();
        self.size = 0;
        self.emitted.push(Chunk {
            sequence_number: self.emitted.len() + 1,
            division: division.map(str::to_string),
            title: title.map(str::to_string),
            text,
        });
    }
}

/// Accumulates lines until the next one would overflow `max_chars`.
pub struct SizeChunker {
    pub max_chars: usize,
}

impl SizeChunker {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn chunk<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Chunk> {
        let mut acc = Accumulator::default();
        for line in lines {
            let line = line.as_ref();
            // A single oversized line is kept whole; parts split it later.
            if acc.size + line.len() + 1 > self.max_chars && acc.is_open() {
                acc.close(None, None);
            }
            acc.push(line.to_string());
        }
        acc.close(None, None);
        acc.emitted
    }
}

/// Splits on `DIVISION <letters>` and `TITLE <roman>` header lines.
#[derive(Default)]
pub struct StructureChunker;

impl StructureChunker {
    pub fn new() -> Self {
        Self
    }

    pub fn chunk<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Chunk> {
        let mut acc = Accumulator::default();
        let mut division: Option<String> = None;
        let mut title: Option<String> = None;

        for line in lines {
            let stripped = line.as_ref().trim();
            if stripped.is_empty() {
                if acc.is_open() {
                    acc.push(String::new());
                }
                continue;
            }

            if let Some(caps) = DIVISION_RE.captures(stripped) {
                acc.close(division.as_deref(), title.as_deref());
                division = Some(caps[1].to_string());
                title = None;
            } else if let Some(caps) = TITLE_RE.captures(stripped) {
                acc.close(division.as_deref(), title.as_deref());
                title = Some(caps[1].to_string());
            }
            acc.push(stripped.to_string());
        }

        acc.close(division.as_deref(), title.as_deref());
        acc.emitted
    }
}

/// Strategy dispatch over the two chunkers.
pub enum Chunker {
    Size(SizeChunker),
    Structure(StructureChunker),
}

impl Chunker {
    pub fn new(strategy: ChunkingStrategy, max_chars: usize) -> Self {
        match strategy {
            ChunkingStrategy::Size => Self::Size(SizeChunker::new(max_chars)),
            ChunkingStrategy::Structure => Self::Structure(StructureChunker::new()),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.chunking_strategy, config.max_chars)
    }

    pub fn chunk<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Chunk> {
        match self {
            Self::Size(c) => c.chunk(lines),
            Self::Structure(c) => c.chunk(lines),
        }
    }

    /// Size bound applied when splitting emitted chunks into parts.
    ///
    /// Structure chunks always use the default bound regardless of config.
    pub fn part_bound(&self) -> usize {
        match self {
            Self::Size(c) => c.max_chars,
            Self::Structure(_) => DEFAULT_MAX_CHARS,
        }
    }
}
