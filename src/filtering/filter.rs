//! Filtering traits.
use crate::pair::SentencePair;
use crate::rules::Named;

/// immutable, pure filter (2 successive equal inputs -> 2 equal outputs)
///
/// Returns `true` if the pair must be excluded.
pub trait Filter: Send + Sync {
    fn detect(&self, pair: &SentencePair) -> bool;
}

/// Ordered filters.
///
/// Evaluation stops at the first matching filter.
#[derive(Default)]
pub struct FilterChain(Vec<Named<Box<dyn Filter>>>);

impl FilterChain {
    pub fn add(&mut self, filter: Named<Box<dyn Filter>>) -> &mut FilterChain {
        self.0.push(filter);
        self
    }

    /// Name of the first filter that excludes the pair, if any.
    pub fn first_match(&self, pair: &SentencePair) -> Option<&str> {
        self.0
            .iter()
            .find(|filter| filter.inner().detect(pair))
            .map(|filter| filter.name())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.name())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::{CharLength, Duplicates};

    fn chain() -> FilterChain {
        let mut chain = FilterChain::default();
        chain
            .add(Named::new("duplicates", Box::new(Duplicates::default())))
            .add(Named::new(
                "char_length",
                Box::new(CharLength::new(0, Some(10))),
            ));
        chain
    }

    #[test]
    fn first_match_wins() {
        // both filters match, only the first one is credited
        let pair = SentencePair::new("a very long line", "a very long line");
        assert_eq!(chain().first_match(&pair), Some("duplicates"));
    }

    #[test]
    fn second_match() {
        let pair = SentencePair::new("a very long line", "une très longue ligne");
        assert_eq!(chain().first_match(&pair), Some("char_length"));
    }

    #[test]
    fn no_match() {
        let pair = SentencePair::new("Hi.", "Salut.");
        assert_eq!(chain().first_match(&pair), None);
    }

    #[test]
    fn empty_chain() {
        let pair = SentencePair::new("Hi.", "Hi.");
        assert!(FilterChain::default().first_match(&pair).is_none());
    }
}
