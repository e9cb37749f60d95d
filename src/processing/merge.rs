/*! Concurrent merge

Runs one [StreamProcessor] per non-weighted source on a rayon pool, and funnels their chunks
through an unbounded channel to a single writer thread, which owns the merged files.

The writer blocks on the channel until a chunk arrives, then drains whatever else is queued
and writes the batch (sources, then targets).
The channel disconnects once every producer has dropped its sender, which only happens after
all their chunks have been queued: the writer exits after having written everything.
!*/
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam::channel::{unbounded, Receiver, Sender};
use log::{debug, error, info};
use rayon::prelude::*;
use serde::Serialize;

use super::stream::{SourceReport, StreamProcessor};
use crate::error::Error;
use crate::io::{PairWriter, WriterTrait};
use crate::pair::SentencePair;
use crate::rules::RuleSet;
use crate::sources::SourceSpec;

/// Outcome of a merge.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeReport {
    pub sources: Vec<SourceReport>,
    /// Pairs written to the merged files.
    pub total: usize,
}

/// Sole consumer of the channel.
fn write_loop(mut writer: PairWriter, rx: Receiver<Vec<SentencePair>>) -> Result<PairWriter, Error> {
    let mut batch = Vec::new();
    while let Ok(chunk) = rx.recv() {
        batch.extend(chunk);
        for chunk in rx.try_iter() {
            batch.extend(chunk);
        }
        writer.write(&batch)?;
        debug!("wrote {} pairs ({} so far)", batch.len(), writer.nb_pairs());
        batch.clear();
    }
    writer.flush()?;
    Ok(writer)
}

/// Merges sources into a pair of files.
pub struct Merger<'a> {
    specs: &'a BTreeMap<String, SourceSpec>,
    rules: &'a BTreeMap<String, RuleSet>,
    threads: Option<usize>,
}

impl<'a> Merger<'a> {
    /// `rules` must hold the resolved rules of every non-weighted source of `specs`.
    pub fn new(
        specs: &'a BTreeMap<String, SourceSpec>,
        rules: &'a BTreeMap<String, RuleSet>,
    ) -> Self {
        Self {
            specs,
            rules,
            threads: None,
        }
    }

    /// Worker pool size. Defaults to the number of CPUs.
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    fn jobs(&self) -> Result<Vec<(&'a SourceSpec, &'a RuleSet)>, Error> {
        let mut jobs = Vec::new();
        for (key, spec) in self.specs {
            if spec.is_weighted() {
                debug!("[{}] weighted, not merged", key);
                continue;
            }
            let rules = self.rules.get(key).ok_or_else(|| {
                Error::Custom(format!("no resolved rules for source {:?}", key))
            })?;
            jobs.push((spec, rules));
        }
        Ok(jobs)
    }

    fn process(
        spec: &SourceSpec,
        rules: &RuleSet,
        tx: &Sender<Vec<SentencePair>>,
        total: &AtomicUsize,
    ) -> Result<SourceReport, Error> {
        let report = StreamProcessor::new(spec, rules).run(|chunk| {
            tx.send(chunk)
                .map_err(|_| Error::Custom("merge writer stopped early".to_string()))
        })?;
        total.fetch_add(report.emitted, Ordering::SeqCst);
        Ok(report)
    }

    /// Merge every non-weighted source into `src_dst`/`tgt_dst`, truncating them.
    ///
    /// Sources are all processed even if one of them fails; the first error (in key order)
    /// is then returned. A writer error takes precedence over producer errors.
    pub fn run(&self, src_dst: &Path, tgt_dst: &Path) -> Result<MergeReport, Error> {
        let jobs = self.jobs()?;
        info!("merging {} sources into {:?}/{:?}", jobs.len(), src_dst, tgt_dst);

        let writer = PairWriter::create(src_dst, tgt_dst)?;
        let (tx, rx) = unbounded();
        let writer_handle = thread::spawn(move || write_loop(writer, rx));

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads.unwrap_or(0))
            .build()?;
        let total = Arc::new(AtomicUsize::new(0));

        // senders are dropped once every job is done, closing the channel
        let results: Vec<Result<SourceReport, Error>> = pool.install(|| {
            jobs.par_iter()
                .map_with(tx, |tx, (spec, rules)| {
                    Self::process(spec, rules, tx, &total)
                })
                .collect()
        });

        let written = writer_handle
            .join()
            .map_err(|_| Error::Custom("merge writer panicked".to_string()))?;

        let mut sources = Vec::with_capacity(results.len());
        let mut first_error = None;
        for result in results {
            match result {
                Ok(report) => sources.push(report),
                Err(e) => {
                    error!("{}", e);
                    first_error.get_or_insert(e);
                }
            }
        }

        let written = written?;
        if let Some(e) = first_error {
            return Err(e);
        }

        let total = total.load(Ordering::SeqCst);
        if written.nb_pairs() != total {
            return Err(Error::Custom(format!(
                "{} pairs emitted but {} written",
                total,
                written.nb_pairs()
            )));
        }

        info!("merged {} pairs", total);
        Ok(MergeReport { sources, total })
    }
}
