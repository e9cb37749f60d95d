//! Merge fingerprint.
//!
//! A hash over the sorted set of merged source keys. File contents are not hashed:
//! editing a source in place does not invalidate a previous merge.
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub fingerprint: String,
    /// Sorted source keys.
    pub sources: Vec<String>,
}

impl Fingerprint {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sources: Vec<String> = keys.into_iter().map(Into::into).collect();
        sources.sort();
        sources.dedup();

        let mut hasher = Sha256::new();
        for key in &sources {
            hasher.update(key.as_bytes());
            hasher.update(b"\n");
        }
        Self {
            fingerprint: format!("{:x}", hasher.finalize()),
            sources,
        }
    }

    /// Read a stored fingerprint. A missing or unreadable record yields [None].
    pub fn load(path: &Path) -> Option<Self> {
        let f = File::open(path).ok()?;
        match serde_json::from_reader(BufReader::new(f)) {
            Ok(fp) => Some(fp),
            Err(e) => {
                warn!("ignoring invalid fingerprint {:?}: {}", path, e);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("writing fingerprint {} to {:?}", self.fingerprint, path);
        let f = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(f, self)?;
        Ok(())
    }

    /// Whether `path` holds the same fingerprint.
    pub fn matches(&self, path: &Path) -> bool {
        Self::load(path).map_or(false, |stored| stored.fingerprint == self.fingerprint)
    }
}
