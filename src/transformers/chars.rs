//! Character-level transforms.
use serde::Deserialize;

use super::Transform;
use crate::pair::SentencePair;

/// `chars` can be declared as a list of strings (characters or words) or as a single string of characters.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CharsArg {
    List(Vec<String>),
    Chars(String),
}

impl Default for CharsArg {
    fn default() -> Self {
        CharsArg::List(Vec::new())
    }
}

impl From<CharsArg> for Vec<String> {
    fn from(arg: CharsArg) -> Self {
        match arg {
            CharsArg::List(l) => l,
            CharsArg::Chars(s) => s.chars().map(String::from).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct RemoveCharsArgs {
    chars: CharsArg,
}

/// Removes every occurrence of the provided characters or words on both sides.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "RemoveCharsArgs")]
pub struct RemoveChars {
    chars: Vec<String>,
}

impl From<RemoveCharsArgs> for RemoveChars {
    fn from(args: RemoveCharsArgs) -> Self {
        Self::new(args.chars.into())
    }
}

impl RemoveChars {
    pub fn new(chars: Vec<String>) -> Self {
        let chars = chars.into_iter().filter(|c| !c.is_empty()).collect();
        Self { chars }
    }
}

impl Transform for RemoveChars {
    fn transform_own(&self, mut pair: SentencePair) -> SentencePair {
        for c in &self.chars {
            if pair.src.contains(c.as_str()) {
                pair.src = pair.src.replace(c.as_str(), "");
            }
            if pair.tgt.contains(c.as_str()) {
                pair.tgt = pair.tgt.replace(c.as_str(), "");
            }
        }
        pair
    }
}

/// Aligns the case of the target's first letter on the source's one.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FirstCaseNormalize {}

/// Replace the first char of `s` with its case-converted version.
fn recase_first(s: &str, upper: bool) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if upper => first.to_uppercase().chain(chars).collect(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Transform for FirstCaseNormalize {
    fn transform_own(&self, mut pair: SentencePair) -> SentencePair {
        let (s, t) = match (pair.src.chars().next(), pair.tgt.chars().next()) {
            (Some(s), Some(t)) if s.is_alphabetic() && t.is_alphabetic() => (s, t),
            _ => return pair,
        };

        if s.is_uppercase() && !t.is_uppercase() {
            pair.tgt = recase_first(&pair.tgt, true);
        } else if s.is_lowercase() && !t.is_lowercase() {
            pair.tgt = recase_first(&pair.tgt, false);
        }
        pair
    }
}
