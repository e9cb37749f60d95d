/*! Corpus reading utilities

Reading is line-by-line on both files of a pair, in lock-step, so that a corpus is never loaded in memory.
!*/
mod textreader;

pub use textreader::{count_lines, PairReader};
