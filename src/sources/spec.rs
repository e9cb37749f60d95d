//! Source resolution.
use std::collections::BTreeMap;
use std::path::PathBuf;

use log::{debug, info};
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::locate::{locate_pair, Location};
use crate::config::{Config, RuleDecl, SourceDecl};
use crate::error::Error;
use crate::rules::RuleRef;

/// A resolved source: its files, languages and rule references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSpec {
    /// Declared location, as written in the configuration.
    pub key: String,
    pub source_path: PathBuf,
    pub target_path: PathBuf,
    pub source_lang: String,
    pub target_lang: String,
    #[serde(skip)]
    pub filters: Vec<RuleRef>,
    #[serde(skip)]
    pub transforms: Vec<RuleRef>,
    #[serde(skip)]
    pub augmenters: Vec<RuleRef>,
    /// Weighted sources are used as-is by the training step and are not merged.
    pub weight: Option<f64>,
    /// hash of the declared location
    pub content_hash: String,
}

impl SourceSpec {
    pub fn is_weighted(&self) -> bool {
        self.weight.is_some()
    }
}

/// Resolution parameters that do not come from the configuration file.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub cache_dir: PathBuf,
    /// swap located source and target files
    pub reverse: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            reverse: false,
        }
    }
}

/// hex sha256 of a source key.
pub fn content_hash(key: &str) -> String {
    format!("{:x}", Sha256::digest(key.as_bytes()))
}

fn rule_refs(global: &[RuleDecl], own: &[RuleDecl]) -> Result<Vec<RuleRef>, Error> {
    global.iter().chain(own).map(RuleRef::try_from).collect()
}

fn resolve_one(
    decl: &SourceDecl,
    config: &Config,
    options: &ResolveOptions,
) -> Result<SourceSpec, Error> {
    let key = decl.location().to_string();
    let hash = content_hash(&key);
    let dir = Location::parse(&key)?.dir(&options.cache_dir, &hash)?;

    // `config` is already reversed: files are located in the on-disk direction, then swapped.
    let (source_lang, target_lang) = (config.from.code.clone(), config.to.code.clone());
    let (source_path, target_path) = if options.reverse {
        let (s, t) = locate_pair(&dir, &target_lang, &source_lang)?;
        (t, s)
    } else {
        locate_pair(&dir, &source_lang, &target_lang)?
    };

    let empty = Vec::new();
    let (own_filters, own_transforms, own_augmenters, weight) = match decl {
        SourceDecl::Location(_) => (&empty, &empty, &empty, None),
        SourceDecl::Detailed(d) => (&d.filters, &d.transforms, &d.augmenters, d.weight),
    };

    let spec = SourceSpec {
        key,
        source_path,
        target_path,
        source_lang,
        target_lang,
        filters: rule_refs(&config.filters, own_filters)?,
        transforms: rule_refs(&config.transforms, own_transforms)?,
        augmenters: rule_refs(&config.augmenters, own_augmenters)?,
        weight,
        content_hash: hash,
    };
    debug!("resolved {:#?}", spec);
    Ok(spec)
}

/// Resolve every declared source of `config`.
///
/// Any source that cannot be resolved fails the whole resolution.
pub fn resolve_sources(
    config: &Config,
    options: &ResolveOptions,
) -> Result<BTreeMap<String, SourceSpec>, Error> {
    let mut specs = BTreeMap::new();
    for decl in &config.sources {
        let spec = resolve_one(decl, config, options)?;
        info!(" - {} ({})", spec.key, spec.content_hash);
        if specs.insert(spec.key.clone(), spec).is_some() {
            return Err(Error::Config(format!(
                "source {:?} is declared more than once",
                decl.location()
            )));
        }
    }
    Ok(specs)
}
