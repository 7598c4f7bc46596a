//! Core sort engine module
//!
//! Provides the fan-out/join orchestration and per-file copy units.

mod copier;

pub use copier::*;
