//! Pipelines.
//!
//! The module provides a light [pipeline::Pipeline] trait, implemented by the
//! corpus annotation pipeline.
mod annotate;
mod cancel;
#[allow(clippy::module_inception)]
pub mod pipeline;
mod summary;

pub use annotate::AnnotatePipeline;
pub use cancel::Cancel;
pub use pipeline::Pipeline;
pub use summary::RunSummary;
