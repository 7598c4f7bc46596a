//! # BucketCopy - Concurrent File Sorter
//!
//! BucketCopy recursively scans a source directory and copies every regular
//! file into a subdirectory of an output directory named after the file's
//! extension, with one concurrent copy unit per file. Files without an
//! extension land in the `unknown` bucket.
//!
//! ## Features
//!
//! - **Concurrent fan-out**: one tokio task per discovered file, joined as
//!   a single barrier before returning
//! - **Per-file error isolation**: a failing copy is logged and recorded,
//!   never aborts its siblings
//! - **Idempotent bucket creation**: safe under concurrent units targeting
//!   the same extension
//! - **Attribute preservation**: permissions and timestamps, best effort
//! - **Optional bounded fan-out**: cap in-flight copies for large trees
//!
//! ## Quick Start
//!
//! ```no_run
//! use bucketcopy::core::sort_tree;
//! use std::path::Path;
//!
//! # async fn run() -> bucketcopy::error::Result<()> {
//! let report = sort_tree(Path::new("/source"), Path::new("/sorted")).await?;
//! println!("Copied {} files ({} bytes)", report.files_copied, report.bytes_copied);
//! # Ok(())
//! # }
//! ```
//!
//! ## Advanced Usage
//!
//! ```no_run
//! use bucketcopy::config::{CollisionPolicy, SortConfig};
//! use bucketcopy::core::SortEngine;
//! use std::path::PathBuf;
//!
//! # async fn run() -> bucketcopy::error::Result<()> {
//! let config = SortConfig {
//!     source: PathBuf::from("/source"),
//!     output: PathBuf::from("/sorted"),
//!     max_in_flight: 64,
//!     collision: CollisionPolicy::Skip,
//!     ..Default::default()
//! };
//!
//! let report = SortEngine::new(config).execute().await?;
//! report.print_summary();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod error;
pub mod fs;

// Re-export commonly used types
pub use config::{CliArgs, CollisionPolicy, SortConfig};
pub use core::{SortEngine, SortReport, UnitOutcome};
pub use error::{BucketCopyError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use bucketcopy::prelude::*;
    //! ```

    pub use crate::config::{CliArgs, CollisionPolicy, SortConfig};
    pub use crate::core::{copy_unit, sort_tree, SortEngine, SortReport, UnitOutcome};
    pub use crate::error::{BucketCopyError, Result};
    pub use crate::fs::{scan_files, CopyOptions, FileCopier, FileEntry, UNKNOWN_BUCKET};
}
