//! Runtime module boundary over the shared domain primitives.

pub use interop_qc_core::contract;
pub use interop_qc_core::rename;
pub use interop_qc_core::run_resolution;
pub use interop_qc_core::uris;
