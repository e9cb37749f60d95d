//! pair-level filters
//!
//! Lengths are counted in unicode codepoints.
use serde::Deserialize;

use super::digits;
use super::Filter;
use crate::pair::SentencePair;

#[inline]
fn nb_chars(s: &str) -> usize {
    s.chars().count()
}

/// Share of the characters of `s` that satisfy `pred`.
#[inline]
fn ratio(s: &str, pred: impl Fn(char) -> bool) -> f64 {
    let total = nb_chars(s);
    if total == 0 {
        return 0.0;
    }
    s.chars().filter(|c| pred(*c)).count() as f64 / total as f64
}

/// Excludes pairs whose source and target are identical.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Duplicates {}

impl Filter for Duplicates {
    fn detect(&self, pair: &SentencePair) -> bool {
        pair.src == pair.tgt
    }
}

/// Excludes pairs where either side is at most [CharLength::min] or at least [CharLength::max] codepoints long.
///
/// No upper bound by default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CharLength {
    min: usize,
    max: Option<usize>,
}

impl CharLength {
    pub fn new(min: usize, max: Option<usize>) -> Self {
        Self { min, max }
    }

    fn out_of_bounds(&self, len: usize) -> bool {
        len <= self.min || self.max.map_or(false, |max| len >= max)
    }
}

impl Filter for CharLength {
    fn detect(&self, pair: &SentencePair) -> bool {
        self.out_of_bounds(nb_chars(&pair.src)) || self.out_of_bounds(nb_chars(&pair.tgt))
    }
}

/// Excludes pairs whose source/target length ratio is at most `min` or at least `max`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SourceTargetRatio {
    min: f64,
    max: Option<f64>,
}

impl SourceTargetRatio {
    pub fn new(min: f64, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

impl Filter for SourceTargetRatio {
    fn detect(&self, pair: &SentencePair) -> bool {
        let tgt_len = nb_chars(&pair.tgt);
        if tgt_len == 0 {
            return true;
        }
        let r = nb_chars(&pair.src) as f64 / tgt_len as f64;
        r <= self.min || self.max.map_or(false, |max| r >= max)
    }
}

/// Excludes pairs where any of [Contains::words] appears on either side.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Contains {
    words: Vec<String>,
}

impl Contains {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }
}

impl Filter for Contains {
    fn detect(&self, pair: &SentencePair) -> bool {
        self.words
            .iter()
            .any(|w| pair.src.contains(w.as_str()) || pair.tgt.contains(w.as_str()))
    }
}

/// Excludes pairs where the share of digit characters, of any script, on either side reaches `max`.
///
/// `max` is 0.4 by default.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DigitsRatio {
    max: f64,
}

impl DigitsRatio {
    pub fn with_max(max: f64) -> Self {
        Self { max }
    }
}

impl Default for DigitsRatio {
    fn default() -> Self {
        Self { max: 0.4 }
    }
}

impl Filter for DigitsRatio {
    fn detect(&self, pair: &SentencePair) -> bool {
        ratio(&pair.src, digits::is_digit) >= self.max
            || ratio(&pair.tgt, digits::is_digit) >= self.max
    }
}

/// Excludes pairs where the share of non-alphanumeric characters (spaces included) on either side reaches `max`.
///
/// `max` is 0.4 by default.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct NonAlphanumRatio {
    max: f64,
}

impl NonAlphanumRatio {
    pub fn with_max(max: f64) -> Self {
        Self { max }
    }
}

impl Default for NonAlphanumRatio {
    fn default() -> Self {
        Self { max: 0.4 }
    }
}

impl Filter for NonAlphanumRatio {
    fn detect(&self, pair: &SentencePair) -> bool {
        let non_alnum = |c: char| !c.is_alphanumeric();
        ratio(&pair.src, non_alnum) >= self.max || ratio(&pair.tgt, non_alnum) >= self.max
    }
}

/// Excludes pairs where the sums of the decimal digits of each side differ.
///
/// `"In 1984"` sums up to 22, so does `"En 1984"` but not `"En 1985"`.
/// Digits of every script count: `"في ١٩٨٤"` sums up to 22 as well.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DigitsSumMismatch {}

impl DigitsSumMismatch {
    fn digits_sum(s: &str) -> u64 {
        s.chars().filter_map(digits::decimal_value).map(u64::from).sum()
    }
}

impl Filter for DigitsSumMismatch {
    fn detect(&self, pair: &SentencePair) -> bool {
        Self::digits_sum(&pair.src) != Self::digits_sum(&pair.tgt)
    }
}
