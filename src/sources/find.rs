//! Case-insensitive search over resolved sources.
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::debug;

use super::SourceSpec;
use crate::error::Error;

/// A line containing the searched text.
#[derive(Debug, Clone, PartialEq)]
pub struct FindMatch {
    pub key: String,
    pub path: PathBuf,
    /// 1-based
    pub line: usize,
    pub content: String,
}

impl fmt::Display for FindMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        write!(f, "{} ({}):{} => {}", self.key, file, self.line, self.content)
    }
}

fn find_in_file(key: &str, path: &Path, needle: &str) -> Result<Vec<FindMatch>, Error> {
    debug!("searching {:?}", path);
    let reader = BufReader::new(File::open(path)?);
    let mut matches = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.to_lowercase().contains(needle) {
            matches.push(FindMatch {
                key: key.to_string(),
                path: path.to_path_buf(),
                line: idx + 1,
                content: line,
            });
        }
    }
    Ok(matches)
}

/// Every line of every source (both sides) containing `text`, ignoring case.
///
/// Matches are ordered by source key, then source file before target file, then line.
pub fn find(specs: &BTreeMap<String, SourceSpec>, text: &str) -> Result<Vec<FindMatch>, Error> {
    let needle = text.to_lowercase();
    let mut matches = Vec::new();
    for (key, spec) in specs {
        matches.extend(find_in_file(key, &spec.source_path, &needle)?);
        matches.extend(find_in_file(key, &spec.target_path, &needle)?);
    }
    Ok(matches)
}
