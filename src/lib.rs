//! Parallel corpus curation.
//!
//! Sources declared in a [config::Config] are resolved ([sources]), cleaned by their
//! [rules] (built from [filtering] and [transformers]), merged and split ([processing]).
//! [pipelines::Curate] chains all of these.
pub mod config;
pub mod error;
pub mod filtering;
pub mod io;
pub mod pair;
pub mod pipelines;
pub mod processing;
pub mod rules;
pub mod sources;
pub mod transformers;
