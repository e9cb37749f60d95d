//! Corpus curation pipeline
//!
//! # Processing
//! 1. Sources are resolved, and so are the rules of each source: any configuration error
//!    stops the run before any processing.
//! 1. If the run directory holds a matching fingerprint and the four split files, the run stops
//!    there and the existing files are reused.
//! 1. Otherwise the split files are removed and the new fingerprint is written.
//! 1. Non-weighted sources are merged concurrently into `merge-src.txt`/`merge-tgt.txt`.
//! 1. The merged files are split into training and validation files, then removed.
//! 1. The training files are deduplicated and a `report.json` is written.
//!
//! A failed run removes the fingerprint again.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{debug, info, warn};
use serde::Serialize;

use crate::config::Config;
use crate::error::Error;
use crate::io::count_lines;
use crate::pipelines::pipeline::Pipeline;
use crate::processing::{
    dedup, Fingerprint, MergeReport, Merger, SourceReport, SplitPaths, SplitReport, Splitter,
};
use crate::rules::{resolve, RuleSet};
use crate::sources::{resolve_sources, ResolveOptions, SourceSpec};

pub const FINGERPRINT_FILE: &str = "fingerprint.json";
pub const REPORT_FILE: &str = "report.json";
const MERGE_SRC: &str = "merge-src.txt";
const MERGE_TGT: &str = "merge-tgt.txt";

/// Run parameters that do not come from the configuration file.
#[derive(Debug, Clone)]
pub struct CurateOptions {
    pub run_dir: PathBuf,
    pub cache_dir: PathBuf,
    /// swap languages, and source and target files
    pub reverse: bool,
    /// remove the run directory first
    pub rerun: bool,
    /// overrides the configured value
    pub max_eval_sentences: Option<usize>,
    pub threads: Option<usize>,
    pub seed: Option<u64>,
}

impl CurateOptions {
    pub fn new(run_dir: PathBuf) -> Self {
        Self {
            run_dir,
            cache_dir: PathBuf::from("cache"),
            reverse: false,
            rerun: false,
            max_eval_sentences: None,
            threads: None,
            seed: None,
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub fingerprint: String,
    /// The existing split files were reused.
    pub cached: bool,
    /// Per-source tallies. Empty when cached.
    pub sources: Vec<SourceReport>,
    /// Sources left to the training step.
    pub weighted: Vec<SourceSpec>,
    pub merged: usize,
    pub split: SplitReport,
    pub duplicates_removed: usize,
    pub files: SplitPaths,
}

pub struct Curate {
    config: Config,
    options: CurateOptions,
}

impl Curate {
    /// Reverses `config` if asked to.
    pub fn new(mut config: Config, options: CurateOptions) -> Self {
        if options.reverse {
            config.reverse();
        }
        Self { config, options }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn prepare_run_dir(&self) -> Result<(), Error> {
        let dir = &self.options.run_dir;
        if self.options.rerun && dir.exists() {
            warn!("removing {:?}", dir);
            std::fs::remove_dir_all(dir)?;
        }
        std::fs::create_dir_all(dir)?;
        Ok(())
    }

    /// Resolve every source and all of their rules, weighted sources included.
    fn resolve(&self) -> Result<(BTreeMap<String, SourceSpec>, BTreeMap<String, RuleSet>), Error> {
        info!(
            "{} ({}) -> {} ({}), sources:",
            self.config.from.name, self.config.from.code, self.config.to.name, self.config.to.code
        );
        let specs = resolve_sources(
            &self.config,
            &ResolveOptions {
                cache_dir: self.options.cache_dir.clone(),
                reverse: self.options.reverse,
            },
        )?;

        let mut rules = BTreeMap::new();
        for (key, spec) in &specs {
            let set = resolve(&spec.filters, &spec.transforms, &spec.augmenters)?;
            rules.insert(key.clone(), set);
        }
        Ok((specs, rules))
    }

    fn cached_report(
        &self,
        fingerprint: Fingerprint,
        weighted: Vec<SourceSpec>,
        files: SplitPaths,
    ) -> Result<RunReport, Error> {
        let split = SplitReport {
            train: count_lines(&files.train_src)?,
            validation: count_lines(&files.val_src)?,
        };
        info!(
            "sources unchanged, reusing {:?} ({} training, {} validation pairs)",
            self.options.run_dir, split.train, split.validation
        );
        Ok(RunReport {
            fingerprint: fingerprint.fingerprint,
            cached: true,
            sources: Vec::new(),
            weighted,
            merged: split.train + split.validation,
            split,
            duplicates_removed: 0,
            files,
        })
    }

    fn write_report(&self, report: &RunReport) -> Result<(), Error> {
        let path = self.options.run_dir.join(REPORT_FILE);
        debug!("writing report to {:?}", path);
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), report)?;
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> Result<(), Error> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

impl Pipeline<RunReport> for Curate {
    fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn run(&self) -> Result<RunReport, Error> {
        let (specs, rules) = self.resolve()?;
        self.prepare_run_dir()?;

        let run_dir = &self.options.run_dir;
        info!("curate v{} into {:?}", Self::version(), run_dir);
        let files = SplitPaths::in_dir(run_dir);
        let weighted: Vec<SourceSpec> = specs.values().filter(|s| s.is_weighted()).cloned().collect();
        if !weighted.is_empty() {
            info!(
                "weighted sources, left to the training step: {}",
                weighted.iter().map(|s| &s.key).join(", ")
            );
        }

        let fingerprint = Fingerprint::new(
            specs
                .values()
                .filter(|s| !s.is_weighted())
                .map(|s| s.key.as_str()),
        );
        let fingerprint_path = run_dir.join(FINGERPRINT_FILE);
        if fingerprint.matches(&fingerprint_path) && files.all_exist() {
            return self.cached_report(fingerprint, weighted, files);
        }

        // a fingerprint is only trusted next to the four split files,
        // which are removed until the new ones are complete
        for path in [&files.train_src, &files.train_tgt, &files.val_src, &files.val_tgt] {
            remove_if_exists(path)?;
        }
        fingerprint.save(&fingerprint_path)?;

        self.curate(&specs, &rules, fingerprint, weighted, files)
            .or_else(|e| {
                remove_if_exists(&fingerprint_path)?;
                Err(e)
            })
    }
}

impl Curate {
    /// Merge, split and deduplicate into `files`.
    fn curate(
        &self,
        specs: &BTreeMap<String, SourceSpec>,
        rules: &BTreeMap<String, RuleSet>,
        fingerprint: Fingerprint,
        weighted: Vec<SourceSpec>,
        files: SplitPaths,
    ) -> Result<RunReport, Error> {
        let run_dir = &self.options.run_dir;
        let merge_src = run_dir.join(MERGE_SRC);
        let merge_tgt = run_dir.join(MERGE_TGT);
        let MergeReport { sources, total } = Merger::new(specs, rules)
            .threads(self.options.threads)
            .run(&merge_src, &merge_tgt)?;

        let max_eval = self
            .options
            .max_eval_sentences
            .unwrap_or(self.config.max_eval_sentences);
        let split = Splitter::new(max_eval, self.config.shuffle_buffer)
            .seed(self.options.seed)
            .run(&merge_src, &merge_tgt, &files)?;
        std::fs::remove_file(&merge_src)?;
        std::fs::remove_file(&merge_tgt)?;

        let duplicates_removed = dedup(&files.train_src, &files.train_tgt)?;

        let report = RunReport {
            fingerprint: fingerprint.fingerprint,
            cached: false,
            sources,
            weighted,
            merged: total,
            split: SplitReport {
                train: split.train - duplicates_removed,
                validation: split.validation,
            },
            duplicates_removed,
            files,
        };
        self.write_report(&report)?;

        info!(
            "training: {} pairs, validation: {} pairs, duplicates removed: {}",
            report.split.train, report.split.validation, report.duplicates_removed
        );
        Ok(report)
    }
}
