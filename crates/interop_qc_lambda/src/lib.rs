//! AWS-oriented adapters and handlers for the BCLConvert InterOp QC event
//! pipeline.
//!
//! This crate owns runtime integration details (Lambda handlers, orcabus API
//! clients, ICAv2 project-data access) and exposes a single runtime module
//! boundary for the contract, URI, and run-resolution primitives.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod runtime;
