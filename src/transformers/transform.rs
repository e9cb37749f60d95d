//! Transform trait.
use crate::pair::SentencePair;
use crate::rules::Named;

pub trait Transform: Send + Sync {
    /// Takes ownership of [SentencePair] and returns it.
    fn transform_own(&self, pair: SentencePair) -> SentencePair;
}

/// Transforms applied in declaration order, each one seeing the output of the previous one.
#[derive(Default)]
pub struct TransformChain(Vec<Named<Box<dyn Transform>>>);

impl TransformChain {
    pub fn add(&mut self, transform: Named<Box<dyn Transform>>) -> &mut TransformChain {
        self.0.push(transform);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|t| t.name())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Transform for TransformChain {
    fn transform_own(&self, pair: SentencePair) -> SentencePair {
        self.0
            .iter()
            .fold(pair, |pair, t| t.inner().transform_own(pair))
    }
}
