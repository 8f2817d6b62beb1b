pub mod analysis;
pub mod engine;
pub mod error;
pub mod io;
pub mod pipelines;
pub mod processing;
