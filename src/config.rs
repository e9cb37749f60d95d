/*! Run configuration.

The configuration is a JSON document (usually `model-config.json`) that declares the language direction
and the list of sources to curate:

```json
{
    "from": { "name": "English", "code": "en" },
    "to": { "name": "French", "code": "fr" },
    "version": "1.0",
    "sources": [
        "file:///data/europarl",
        { "source": "https://example.org/opus.zip", "filters": ["duplicates", { "char_length": { "min": 2 } }] },
        { "source": "file:///data/backtranslated", "weight": 0.5 }
    ],
    "filters": ["digits_sum_mismatch"]
}
```

Keys that are not related to curation (training hyper-parameters, etc.) are ignored.
!*/
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Default upper bound of validation pairs.
pub const MAX_EVAL_SENTENCES: usize = 5000;

/// Default size (in pairs) of the training shuffle buffer.
pub const SHUFFLE_BUFFER: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Language {
    pub name: String,
    pub code: String,
}

/// A rule declaration: either a bare rule name or a single-key object `{name: kwargs}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RuleDecl {
    Name(String),
    WithArgs(BTreeMap<String, Value>),
}

/// A source declaration: either a bare location or a location with its own rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SourceDecl {
    Location(String),
    Detailed(DetailedSource),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DetailedSource {
    pub source: String,
    #[serde(default)]
    pub filters: Vec<RuleDecl>,
    #[serde(default)]
    pub transforms: Vec<RuleDecl>,
    #[serde(default)]
    pub augmenters: Vec<RuleDecl>,
    /// Weighted sources are handed to the training step as-is and are not merged.
    pub weight: Option<f64>,
}

impl SourceDecl {
    /// Declared location, also used as the source key.
    pub fn location(&self) -> &str {
        match self {
            SourceDecl::Location(l) => l,
            SourceDecl::Detailed(d) => &d.source,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    pub from: Language,
    pub to: Language,
    pub version: String,
    pub sources: Vec<SourceDecl>,

    /// Run-level rules, prepended to every source's own rules.
    #[serde(default)]
    pub filters: Vec<RuleDecl>,
    #[serde(default)]
    pub transforms: Vec<RuleDecl>,
    #[serde(default)]
    pub augmenters: Vec<RuleDecl>,

    #[serde(default = "default_max_eval_sentences")]
    pub max_eval_sentences: usize,
    #[serde(default = "default_shuffle_buffer")]
    pub shuffle_buffer: usize,
}

fn default_max_eval_sentences() -> usize {
    MAX_EVAL_SENTENCES
}

fn default_shuffle_buffer() -> usize {
    SHUFFLE_BUFFER
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let f = File::open(path).map_err(|e| {
            Error::Config(format!("cannot open config file {:?}: {}", path, e))
        })?;
        let config: Config = serde_json::from_reader(BufReader::new(f))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.sources.is_empty() {
            return Err(Error::Config("no sources declared".to_string()));
        }
        if self.from.code == self.to.code {
            return Err(Error::Config(format!(
                "source and target languages are both {:?}",
                self.from.code
            )));
        }
        for decl in &self.sources {
            if let SourceDecl::Detailed(DetailedSource {
                source,
                weight: Some(w),
                ..
            }) = decl
            {
                if !w.is_finite() || *w < 0.0 {
                    return Err(Error::Config(format!(
                        "source {:?} has an invalid weight {}",
                        source, w
                    )));
                }
            }
        }
        Ok(())
    }

    /// Swap source and target languages.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    /// `<from>_<to>-<version>`
    pub fn model_dirname(&self) -> String {
        format!("{}_{}-{}", self.from.code, self.to.code, self.version)
    }

    /// Default run directory, rooted at `base`.
    pub fn run_dir(&self, base: &Path) -> PathBuf {
        base.join("run").join(self.model_dirname())
    }

    /// JSON Schema of the configuration file.
    pub fn schema() -> Result<String, Error> {
        let schema = schemars::schema_for!(Config);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const CONFIG: &str = r#"{
        "from": {"name": "English", "code": "en"},
        "to": {"name": "French", "code": "fr"},
        "version": "1.0",
        "vocab_size": 32000,
        "sources": [
            "file:///tmp/a",
            {"source": "file:///tmp/b", "filters": ["duplicates", {"char_length": {"min": 2}}]},
            {"source": "file:///tmp/c", "weight": 2}
        ],
        "transforms": ["first_case_normalize"]
    }"#;

    #[test]
    fn parse() {
        let c = CONFIG.parse::<Config>().unwrap();
        assert_eq!(c.sources.len(), 3);
        assert_eq!(c.sources[0], SourceDecl::Location("file:///tmp/a".to_string()));
        assert_eq!(c.max_eval_sentences, MAX_EVAL_SENTENCES);
        assert_eq!(c.transforms, vec![RuleDecl::Name("first_case_normalize".into())]);

        match &c.sources[1] {
            SourceDecl::Detailed(d) => {
                assert_eq!(d.filters[0], RuleDecl::Name("duplicates".into()));
                let mut args = BTreeMap::new();
                args.insert("char_length".to_string(), json!({"min": 2}));
                assert_eq!(d.filters[1], RuleDecl::WithArgs(args));
                assert_eq!(d.weight, None);
            }
            other => panic!("expected detailed source, got {:?}", other),
        }

        assert_eq!(c.sources[2].location(), "file:///tmp/c");
    }

    #[test]
    fn no_sources() {
        let c = r#"{"from": {"name": "a", "code": "en"}, "to": {"name": "b", "code": "fr"}, "version": "1", "sources": []}"#;
        assert!(matches!(c.parse::<Config>(), Err(Error::Config(_))));
    }

    #[test]
    fn negative_weight() {
        let c = r#"{"from": {"name": "a", "code": "en"}, "to": {"name": "b", "code": "fr"}, "version": "1",
            "sources": [{"source": "x", "weight": -1}]}"#;
        assert!(matches!(c.parse::<Config>(), Err(Error::Config(_))));
    }

    #[test]
    fn reverse() {
        let mut c = CONFIG.parse::<Config>().unwrap();
        c.reverse();
        assert_eq!(c.from.code, "fr");
        assert_eq!(c.model_dirname(), "fr_en-1.0");
    }

    #[test]
    fn schema_is_json() {
        let s = Config::schema().unwrap();
        let v: Value = serde_json::from_str(&s).unwrap();
        assert!(v.get("properties").is_some());
    }
}
