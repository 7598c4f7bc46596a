//! File system module
//!
//! Provides recursive file scanning and the blocking copy primitive
//! used by the copy engine.

mod operations;
mod scanner;

pub use operations::*;
pub use scanner::*;
