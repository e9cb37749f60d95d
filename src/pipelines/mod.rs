//! Pipelines.
//!
//! The [curate::Curate] pipeline chains source resolution, merging, splitting and deduplication.
//! The module provides a light [pipeline::Pipeline] trait that pipelines implement.
pub mod curate;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use curate::{Curate, CurateOptions, RunReport};
pub use pipeline::Pipeline;
