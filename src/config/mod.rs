//! Configuration module for BucketCopy
//!
//! Provides configuration management including CLI arguments
//! and runtime settings.

mod settings;

pub use settings::*;
