/*! Filtering utilities

Filters operate on sentence pairs and return `true` when the pair has to be **excluded**.

Filters implement [filter::Filter] and are chained in a [filter::FilterChain]:
the first filter of the chain that matches a pair excludes it and is credited for the exclusion.

Two rules are not predicates but windows (see [window]): `top` and `excerpt` restrict
the range of lines of a source that is read at all.
!*/
mod digits;
mod filter;
mod pair;
pub mod window;

pub use filter::{Filter, FilterChain};
pub use pair::{
    CharLength, Contains, DigitsRatio, DigitsSumMismatch, Duplicates, NonAlphanumRatio,
    SourceTargetRatio,
};
pub use window::{Window, WindowSpec};
