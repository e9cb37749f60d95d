/*! Pair transformers.

Transforms rewrite a pair ([Transform]), augmenters derive new pairs from one ([Augment]).

Augmented pairs are appended after their origin and never go through filters or transforms again.
!*/

mod augment;
mod brackets;
mod chars;
mod transform;

pub use augment::{Augment, AugmenterChain, Lowercase, SingleWordPunctuation};
pub use brackets::RemoveUnpairedQuotesAndBrackets;
pub use chars::{FirstCaseNormalize, RemoveChars};
pub use transform::{Transform, TransformChain};
