//! Shared BCLConvert InterOp QC domain primitives.
//!
//! This crate owns the event contracts, URI construction, workflow-run
//! resolution, and sample-rename behavior shared by the pipeline handlers.
//! It intentionally excludes AWS SDK, Lambda runtime, and HTTP concerns.

pub mod contract;
pub mod rename;
pub mod run_resolution;
pub mod uris;
