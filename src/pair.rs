//! Sentence pair.
use std::fmt;

/// An aligned source/target line pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SentencePair {
    pub src: String,
    pub tgt: String,
}

impl SentencePair {
    pub fn new(src: impl Into<String>, tgt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            tgt: tgt.into(),
        }
    }

    /// Build a pair from two raw lines, stripping the line terminator.
    ///
    /// Returns [None] if either side is blank.
    pub fn from_lines(src: &str, tgt: &str) -> Option<Self> {
        let src = strip_terminator(src);
        let tgt = strip_terminator(tgt);
        if src.trim_end().is_empty() || tgt.trim_end().is_empty() {
            return None;
        }
        Some(Self::new(src, tgt))
    }

    /// Key used for exact-duplicate detection.
    ///
    /// Lines never contain `\n`, so it is a safe separator.
    pub fn dedup_key(&self) -> Vec<u8> {
        let mut key = Vec::with_capacity(self.src.len() + self.tgt.len() + 1);
        key.extend_from_slice(self.src.as_bytes());
        key.push(b'\n');
        key.extend_from_slice(self.tgt.as_bytes());
        key
    }
}

impl From<(String, String)> for SentencePair {
    fn from((src, tgt): (String, String)) -> Self {
        Self { src, tgt }
    }
}

impl fmt::Display for SentencePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ||| {}", self.src, self.tgt)
    }
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
