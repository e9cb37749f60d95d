/*!
# Aligned writing

[PairWriter] holds a source and a target file, and writes sentence pairs to both,
source first, keeping them line-aligned.
!*/
mod textwriter;
mod writertrait;

pub use textwriter::PairWriter;
pub use writertrait::WriterTrait;
