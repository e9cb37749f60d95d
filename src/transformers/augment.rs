//! Augmenters: derive additional pairs from an existing one.
use serde::Deserialize;

use crate::pair::SentencePair;
use crate::rules::Named;

pub trait Augment: Send + Sync {
    /// Additional pairs derived from `pair`. The original pair is never part of the output.
    fn augment(&self, pair: &SentencePair) -> Vec<SentencePair>;
}

/// Augmenters applied in declaration order, all on the same (transformed) pair.
#[derive(Default)]
pub struct AugmenterChain(Vec<Named<Box<dyn Augment>>>);

impl AugmenterChain {
    pub fn add(&mut self, augmenter: Named<Box<dyn Augment>>) -> &mut AugmenterChain {
        self.0.push(augmenter);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|a| a.name())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Augment for AugmenterChain {
    fn augment(&self, pair: &SentencePair) -> Vec<SentencePair> {
        self.0
            .iter()
            .flat_map(|a| a.inner().augment(pair))
            .collect()
    }
}

/// Single-word pairs: removes the trailing punctuation when both sides share it,
/// or adds each punctuation char when neither side has one and the source ends
/// with an alphanumeric char. Pairs left empty by the removal are not produced.
///
/// Punctuation chars are `?!.` by default.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SingleWordPunctuation {
    chars: String,
}

impl Default for SingleWordPunctuation {
    fn default() -> Self {
        Self {
            chars: "?!.".to_string(),
        }
    }
}

impl SingleWordPunctuation {
    pub fn new(chars: &str) -> Self {
        Self {
            chars: chars.to_string(),
        }
    }
}

impl Augment for SingleWordPunctuation {
    fn augment(&self, pair: &SentencePair) -> Vec<SentencePair> {
        if pair.src.contains(' ') || pair.tgt.contains(' ') {
            return Vec::new();
        }
        let (s_last, t_last) = match (pair.src.chars().last(), pair.tgt.chars().last()) {
            (Some(s), Some(t)) => (s, t),
            _ => return Vec::new(),
        };

        let mut out = Vec::new();
        for ch in self.chars.chars() {
            if s_last == ch && t_last == ch {
                let src = &pair.src[..pair.src.len() - ch.len_utf8()];
                let tgt = &pair.tgt[..pair.tgt.len() - ch.len_utf8()];
                if !src.is_empty() && !tgt.is_empty() {
                    out.push(SentencePair::new(src, tgt));
                }
            }
        }

        if !self.chars.contains(s_last) && s_last.is_alphanumeric() && !self.chars.contains(t_last)
        {
            for ch in self.chars.chars() {
                out.push(SentencePair::new(
                    format!("{}{}", pair.src, ch),
                    format!("{}{}", pair.tgt, ch),
                ));
            }
        }

        out
    }
}

/// Lowercased copy of the pair, if lowercasing changes both sides.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Lowercase {}

impl Augment for Lowercase {
    fn augment(&self, pair: &SentencePair) -> Vec<SentencePair> {
        let src = pair.src.to_lowercase();
        let tgt = pair.tgt.to_lowercase();
        if src != pair.src && tgt != pair.tgt {
            vec![SentencePair { src, tgt }]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(src: &str, tgt: &str) -> SentencePair {
        SentencePair::new(src, tgt)
    }

    #[test]
    fn punctuation_removed() {
        let a = SingleWordPunctuation::default();
        assert_eq!(a.augment(&p("Hello!", "Salut!")), vec![p("Hello", "Salut")]);
    }

    #[test]
    fn punctuation_added() {
        let a = SingleWordPunctuation::default();
        assert_eq!(
            a.augment(&p("Hello", "Salut")),
            vec![p("Hello?", "Salut?"), p("Hello!", "Salut!"), p("Hello.", "Salut.")]
        );
    }

    #[test]
    fn punctuation_not_single_word() {
        let a = SingleWordPunctuation::default();
        assert!(a.augment(&p("Hello there", "Salut")).is_empty());
    }

    #[test]
    fn punctuation_mismatch() {
        let a = SingleWordPunctuation::new(".");
        assert!(a.augment(&p("Hello.", "Salut")).is_empty());
    }

    #[test]
    fn punctuation_never_empty() {
        let a = SingleWordPunctuation::new(".");
        assert!(a.augment(&p(".", ".")).is_empty());
        assert!(a.augment(&p("a.", ".")).is_empty());
    }

    #[test]
    fn punctuation_added_after_target_symbol() {
        let a = SingleWordPunctuation::new("!");
        // only the source has to end with an alphanumeric char
        assert_eq!(a.augment(&p("Hello", "Salut»")), vec![p("Hello!", "Salut»!")]);
        assert!(a.augment(&p("Hello»", "Salut")).is_empty());
    }

    #[test]
    fn lowercase() {
        let a = Lowercase::default();
        assert_eq!(a.augment(&p("Hello", "Bonjour")), vec![p("hello", "bonjour")]);
        assert!(a.augment(&p("hello", "Bonjour")).is_empty());
    }

    #[test]
    fn chain_appends_in_order() {
        let mut chain = AugmenterChain::default();
        chain
            .add(Named::new("lowercase", Box::new(Lowercase::default())))
            .add(Named::new(
                "single_word_punctuation",
                Box::new(SingleWordPunctuation::new("!")),
            ));
        assert_eq!(
            chain.augment(&p("Hello", "Salut")),
            vec![p("hello", "salut"), p("Hello!", "Salut!")]
        );
    }
}
