//! Main sort engine
//!
//! Orchestrates the concurrent copy pipeline: scan the source tree, launch
//! one copy unit per file, join them all, and aggregate the outcomes.

use crate::config::{CollisionPolicy, SortConfig};
use crate::error::{BucketCopyError, IoResultExt, Result};
use crate::fs::{scan_files, CopyOptions, CopyStats, FileCopier, FileEntry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Outcome of a single copy unit
#[derive(Debug, Clone)]
pub enum UnitOutcome {
    /// File copied to its bucket
    Copied {
        /// Source path
        source: PathBuf,
        /// Destination path
        dest: PathBuf,
        /// Bytes copied
        bytes: u64,
    },
    /// Destination existed and the collision policy kept it
    Skipped {
        /// Source path
        source: PathBuf,
        /// Existing destination path
        dest: PathBuf,
    },
    /// Copy failed; the error was absorbed by the unit
    Failed {
        /// Source path
        source: PathBuf,
        /// Error detail
        error: String,
    },
}

/// Aggregate result of one sort run
#[derive(Debug, Default)]
pub struct SortReport {
    /// Files copied
    pub files_copied: u64,
    /// Files skipped by the collision policy
    pub files_skipped: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Failed units as (source path, error detail)
    pub failures: Vec<(String, String)>,
    /// Total duration
    pub duration: Duration,
}

impl SortReport {
    /// Check if the run completed without per-file failures
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of copy attempts recorded
    pub fn attempts(&self) -> u64 {
        self.files_copied + self.files_skipped + self.failures.len() as u64
    }

    /// Fold one unit outcome into the report
    pub fn record(&mut self, outcome: UnitOutcome) {
        match outcome {
            UnitOutcome::Copied { bytes, .. } => {
                self.files_copied += 1;
                self.bytes_copied += bytes;
            }
            UnitOutcome::Skipped { .. } => {
                self.files_skipped += 1;
            }
            UnitOutcome::Failed { source, error } => {
                self.failures.push((source.display().to_string(), error));
            }
        }
    }

    /// Print summary to console
    pub fn print_summary(&self) {
        println!("\n=== Sort Summary ===");
        println!("Files copied:    {}", self.files_copied);
        println!(
            "Bytes copied:    {}",
            humansize::format_size(self.bytes_copied, humansize::BINARY)
        );
        if self.files_skipped > 0 {
            println!("Files skipped:   {}", self.files_skipped);
        }
        println!("Duration:        {:.2?}", self.duration);

        if !self.failures.is_empty() {
            println!("\nFailures: {}", self.failures.len());
            for (path, error) in &self.failures {
                println!("  {} - {}", path, error);
            }
        }
    }
}

/// One copy unit: classify the file, ensure its bucket directory exists,
/// and copy bytes and attributes into it.
///
/// Never returns an error. Success and failure are both converted to a log
/// line and a [`UnitOutcome`], so one bad file cannot abort the batch.
pub async fn copy_unit(
    entry: FileEntry,
    output: PathBuf,
    options: CopyOptions,
    collision: CollisionPolicy,
) -> UnitOutcome {
    let dest = output.join(entry.bucket()).join(&entry.file_name);

    match run_copy(&entry, &dest, options, collision).await {
        Ok(Some(stats)) => {
            tracing::info!(
                "Copied {} -> {}",
                entry.path.display(),
                dest.display()
            );
            UnitOutcome::Copied {
                source: entry.path,
                dest,
                bytes: stats.bytes_copied,
            }
        }
        Ok(None) => {
            tracing::info!(
                "Skipped {} (destination {} exists)",
                entry.path.display(),
                dest.display()
            );
            UnitOutcome::Skipped {
                source: entry.path,
                dest,
            }
        }
        Err(e) => {
            tracing::error!("Failed to copy {}: {}", entry.path.display(), e);
            UnitOutcome::Failed {
                source: entry.path,
                error: e.to_string(),
            }
        }
    }
}

/// Dispatch the blocking part of a copy unit to a worker thread.
///
/// Returns `Ok(None)` when the collision policy skipped the copy.
async fn run_copy(
    entry: &FileEntry,
    dest: &Path,
    options: CopyOptions,
    collision: CollisionPolicy,
) -> Result<Option<CopyStats>> {
    let source = entry.path.clone();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || {
        // Bucket creation is idempotent and safe under concurrent callers.
        if let Some(bucket_dir) = dest.parent() {
            std::fs::create_dir_all(bucket_dir).with_path(bucket_dir)?;
        }

        match collision {
            CollisionPolicy::Overwrite => {}
            CollisionPolicy::Skip => {
                if dest.exists() {
                    return Ok(None);
                }
            }
            CollisionPolicy::Error => {
                if dest.exists() {
                    return Err(BucketCopyError::DestinationExists(dest));
                }
            }
        }

        FileCopier::new(options).copy(&source, &dest).map(Some)
    })
    .await
    .map_err(|e| BucketCopyError::TaskJoin(e.to_string()))?
}

/// Main sort engine
pub struct SortEngine {
    config: SortConfig,
}

impl SortEngine {
    /// Create a new sort engine
    pub fn new(config: SortConfig) -> Self {
        Self { config }
    }

    fn copy_options(&self) -> CopyOptions {
        CopyOptions {
            buffer_size: self.config.buffer_size,
            preserve_permissions: self.config.preserve,
            preserve_mtime: self.config.preserve,
            preallocate: true,
        }
    }

    /// Execute the sort operation.
    ///
    /// Scans the source tree, launches every copy unit eagerly, and returns
    /// only after all units have finished. Per-file failures are absorbed
    /// into the report; a scan failure propagates.
    pub async fn execute(&self) -> Result<SortReport> {
        let start = Instant::now();

        if !self.config.source.exists() {
            return Err(BucketCopyError::NotFound(self.config.source.clone()));
        }
        if !self.config.source.is_dir() {
            return Err(BucketCopyError::NotADirectory(self.config.source.clone()));
        }

        std::fs::create_dir_all(&self.config.output).with_path(&self.config.output)?;

        let entries = scan_files(&self.config.source)?;

        if entries.is_empty() {
            return Ok(SortReport {
                duration: start.elapsed(),
                ..Default::default()
            });
        }

        // Optional cap on in-flight copies; default is unbounded fan-out.
        let semaphore = if self.config.max_in_flight > 0 {
            Some(Arc::new(Semaphore::new(self.config.max_in_flight)))
        } else {
            None
        };

        let mut handles = Vec::with_capacity(entries.len());
        for entry in entries {
            let output = self.config.output.clone();
            let options = self.copy_options();
            let collision = self.config.collision;
            let semaphore = semaphore.clone();

            handles.push(tokio::spawn(async move {
                let _permit = match semaphore {
                    Some(sem) => match sem.acquire_owned().await {
                        Ok(permit) => Some(permit),
                        Err(e) => {
                            return UnitOutcome::Failed {
                                source: entry.path,
                                error: e.to_string(),
                            }
                        }
                    },
                    None => None,
                };

                copy_unit(entry, output, options, collision).await
            }));
        }

        // Full join barrier: no short-circuit, no sibling cancellation.
        let mut report = SortReport::default();
        for joined in futures::future::join_all(handles).await {
            match joined {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    tracing::error!("Copy task panicked: {}", e);
                    report
                        .failures
                        .push(("<unknown>".to_string(), e.to_string()));
                }
            }
        }

        report.duration = start.elapsed();
        Ok(report)
    }
}

/// Sort a source tree into extension buckets with default settings
pub async fn sort_tree(source: &Path, output: &Path) -> Result<SortReport> {
    let config = SortConfig {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        ..Default::default()
    };

    SortEngine::new(config).execute().await
}
