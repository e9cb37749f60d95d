/*!
# IO utilities

Aligned reading and writing of parallel text files.

A corpus is a couple of newline-delimited UTF-8 files where line *i* of the source file
is the translation of line *i* of the target file. There is no header: alignment is positional.
!*/
pub mod reader;
pub mod writer;

pub use reader::{count_lines, PairReader};
pub use writer::{PairWriter, WriterTrait};
