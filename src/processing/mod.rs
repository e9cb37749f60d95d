/*! Corpus processing

Per-source streaming ([stream]), concurrent merging ([merge]), train/validation splitting ([split])
and deduplication ([dedup]) of aligned corpora, along with the [fingerprint] that lets a run skip
these steps when its set of sources did not change.
!*/
pub mod dedup;
pub mod fingerprint;
pub mod merge;
pub mod split;
pub mod stream;

pub use dedup::dedup;
pub use fingerprint::Fingerprint;
pub use merge::{MergeReport, Merger};
pub use split::{validation_count, SplitPaths, SplitReport, Splitter};
pub use stream::{SourceReport, StreamProcessor};
