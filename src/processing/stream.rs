//! Per-source stream processing.
//!
//! Streams the aligned lines of one source through its windows, filters, transforms and
//! augmenters, handing surviving pairs out in chunks.
use std::collections::BTreeMap;

use log::{debug, info};
use serde::Serialize;

use crate::error::Error;
use crate::filtering::Window;
use crate::io::{count_lines, PairReader};
use crate::pair::SentencePair;
use crate::rules::RuleSet;
use crate::sources::SourceSpec;
use crate::transformers::{Augment, Transform};

/// Number of pairs handed out at once.
pub const CHUNK_SIZE: usize = 10_000;

/// Tallies of a processed source.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceReport {
    pub key: String,
    /// Lines read inside the window.
    pub lines_seen: usize,
    /// Lines with a blank side.
    pub blank: usize,
    /// Excluded lines, by the name of the first matching filter.
    pub filtered: BTreeMap<String, usize>,
    /// Pairs added by augmenters.
    pub augmented: usize,
    /// Pairs handed out, augmented ones included.
    pub emitted: usize,
}

impl SourceReport {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Default::default()
        }
    }

    pub fn nb_filtered(&self) -> usize {
        self.filtered.values().sum()
    }
}

/// Processes one source with its resolved rules.
pub struct StreamProcessor<'a> {
    spec: &'a SourceSpec,
    rules: &'a RuleSet,
    chunk_size: usize,
}

impl<'a> StreamProcessor<'a> {
    pub fn new(spec: &'a SourceSpec, rules: &'a RuleSet) -> Self {
        Self {
            spec,
            rules,
            chunk_size: CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Line window, counting the source lines first if a windowing rule is declared.
    fn window(&self) -> Result<Window, Error> {
        if !self.rules.has_window() {
            return Ok(Window::default());
        }
        let nb_lines = count_lines(&self.spec.source_path)?;
        let window = self.rules.window(nb_lines).unwrap_or_default();
        debug!(
            "[{}] {} lines, window {:?}",
            self.spec.key, nb_lines, window
        );
        Ok(window)
    }

    /// Pass one pair through filters, transforms and augmenters, pushing survivors to `out`.
    fn process_pair(
        &self,
        pair: SentencePair,
        report: &mut SourceReport,
        out: &mut Vec<SentencePair>,
    ) {
        if let Some(name) = self.rules.filters.first_match(&pair) {
            *report.filtered.entry(name.to_string()).or_insert(0) += 1;
            return;
        }

        let pair = self.rules.transforms.transform_own(pair);
        let augmented = self.rules.augmenters.augment(&pair);
        report.augmented += augmented.len();
        report.emitted += augmented.len() + 1;

        out.push(pair);
        out.extend(augmented);
    }

    /// Stream the source, calling `emit` with chunks of surviving pairs in file order.
    ///
    /// Any reading error (alignment faults included) stops processing and is returned.
    pub fn run<F>(&self, mut emit: F) -> Result<SourceReport, Error>
    where
        F: FnMut(Vec<SentencePair>) -> Result<(), Error>,
    {
        info!("[{}] processing", self.spec.key);
        let window = self.window()?;
        let reader = PairReader::open(&self.spec.source_path, &self.spec.target_path)?;

        let mut report = SourceReport::new(&self.spec.key);
        let mut chunk = Vec::with_capacity(self.chunk_size);

        for line in reader {
            let (idx, src, tgt) = line?;
            if window.is_past(idx) {
                break;
            }
            if window.is_before(idx) {
                continue;
            }
            report.lines_seen += 1;

            match SentencePair::from_lines(&src, &tgt) {
                Some(pair) => self.process_pair(pair, &mut report, &mut chunk),
                None => report.blank += 1,
            }

            if chunk.len() >= self.chunk_size {
                let full = std::mem::replace(&mut chunk, Vec::with_capacity(self.chunk_size));
                emit(full)?;
            }
        }

        if !chunk.is_empty() {
            emit(chunk)?;
        }

        info!(
            "[{}] seen: {}, blank: {}, filtered: {} {:?}, augmented: {}, emitted: {}",
            report.key,
            report.lines_seen,
            report.blank,
            report.nb_filtered(),
            report.filtered,
            report.augmented,
            report.emitted
        );
        Ok(report)
    }
}
