//! Configuration settings for BucketCopy
//!
//! Defines all configuration options, CLI arguments, and defaults
//! for the sort operation.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// BucketCopy - sort files into per-extension buckets, concurrently
#[derive(Parser, Debug, Clone)]
#[command(name = "bucketcopy")]
#[command(author = "BucketCopy Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Copy files into output subdirectories named after their extensions")]
#[command(long_about = r#"
BucketCopy recursively scans a source directory and copies every regular
file into <OUTPUT>/<extension>/, launching one concurrent copy unit per
file. Files without an extension land in <OUTPUT>/unknown/.

Examples:
  bucketcopy ~/Downloads ~/sorted                # Sort a directory
  bucketcopy /data /out --max-in-flight 64       # Cap concurrent copies
  bucketcopy /data /out --collision skip -v      # Keep first on collision
"#)]
pub struct CliArgs {
    /// Source directory to scan
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output directory for the sorted tree (created if absent)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Maximum concurrent copies (0 = unbounded)
    #[arg(long, default_value = "0", value_name = "NUM")]
    pub max_in_flight: usize,

    /// Behavior when the destination file already exists
    #[arg(long, value_enum, default_value = "overwrite", value_name = "POLICY")]
    pub collision: CollisionPolicy,

    /// Buffer size for file operations (e.g., 1M, 64K)
    #[arg(short = 'b', long, default_value = "1M", value_name = "SIZE")]
    pub buffer_size: String,

    /// Preserve file attributes (permissions, timestamps)
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true, value_name = "BOOL")]
    pub preserve: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress the end-of-run summary)
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Policy for destination files that already exist
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Last writer wins, overwrite silently (original behavior)
    #[default]
    Overwrite,
    /// Keep the existing destination, skip the copy
    Skip,
    /// Report a per-file error, leave the destination untouched
    Error,
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortConfig {
    /// Source directory
    pub source: PathBuf,
    /// Output root directory
    pub output: PathBuf,
    /// Maximum concurrent copies (0 = unbounded)
    pub max_in_flight: usize,
    /// Collision policy
    pub collision: CollisionPolicy,
    /// Buffer size in bytes
    pub buffer_size: usize,
    /// Preserve attributes
    pub preserve: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            output: PathBuf::new(),
            max_in_flight: 0, // Unbounded fan-out
            collision: CollisionPolicy::Overwrite,
            buffer_size: 1024 * 1024, // 1MB
            preserve: true,
        }
    }
}

impl SortConfig {
    /// Create config from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, String> {
        let buffer_size =
            parse_size(&args.buffer_size).map_err(|e| format!("Invalid buffer size: {}", e))?;

        Ok(Self {
            source: args.source.clone(),
            output: args.output.clone(),
            max_in_flight: args.max_in_flight,
            collision: args.collision,
            buffer_size: buffer_size as usize,
            preserve: args.preserve,
        })
    }
}

/// Parse human-readable size string to bytes
pub fn parse_size(size: &str) -> Result<u64, String> {
    let size = size.trim().to_uppercase();

    if size.is_empty() {
        return Err("Empty size string".to_string());
    }

    let (num_str, multiplier) = if size.ends_with("GB") || size.ends_with('G') {
        let num = size.trim_end_matches(|c| c == 'G' || c == 'B');
        (num.to_string(), 1024u64 * 1024 * 1024)
    } else if size.ends_with("MB") || size.ends_with('M') {
        let num = size.trim_end_matches(|c| c == 'M' || c == 'B');
        (num.to_string(), 1024u64 * 1024)
    } else if size.ends_with("KB") || size.ends_with('K') {
        let num = size.trim_end_matches(|c| c == 'K' || c == 'B');
        (num.to_string(), 1024u64)
    } else if size.ends_with('B') {
        (size.trim_end_matches('B').to_string(), 1u64)
    } else {
        // Assume bytes if no suffix
        (size, 1u64)
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: {}", num_str))?;

    Ok((num * multiplier as f64) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1024").unwrap(), 1024);
        assert_eq!(parse_size("1K").unwrap(), 1024);
        assert_eq!(parse_size("1KB").unwrap(), 1024);
        assert_eq!(parse_size("1M").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("1G").unwrap(), 1024 * 1024 * 1024);
        assert_eq!(
            parse_size("1.5M").unwrap(),
            (1.5 * 1024.0 * 1024.0) as u64
        );
        assert!(parse_size("").is_err());
        assert!(parse_size("abc").is_err());
    }

    #[test]
    fn test_config_from_cli() {
        let args = CliArgs::parse_from(["bucketcopy", "/src", "/out"]);
        let config = SortConfig::from_cli(&args).unwrap();

        assert_eq!(config.source, PathBuf::from("/src"));
        assert_eq!(config.output, PathBuf::from("/out"));
        assert_eq!(config.max_in_flight, 0);
        assert_eq!(config.collision, CollisionPolicy::Overwrite);
        assert_eq!(config.buffer_size, 1024 * 1024);
        assert!(config.preserve);
    }

    #[test]
    fn test_cli_collision_and_bound() {
        let args = CliArgs::parse_from([
            "bucketcopy",
            "/src",
            "/out",
            "--collision",
            "skip",
            "--max-in-flight",
            "16",
            "-b",
            "64K",
        ]);
        let config = SortConfig::from_cli(&args).unwrap();

        assert_eq!(config.collision, CollisionPolicy::Skip);
        assert_eq!(config.max_in_flight, 16);
        assert_eq!(config.buffer_size, 64 * 1024);
    }

    #[test]
    fn test_preserve_can_be_disabled() {
        let args = CliArgs::parse_from(["bucketcopy", "/src", "/out", "--preserve", "false"]);
        let config = SortConfig::from_cli(&args).unwrap();
        assert!(!config.preserve);

        let args = CliArgs::parse_from(["bucketcopy", "/src", "/out", "--preserve=true"]);
        let config = SortConfig::from_cli(&args).unwrap();
        assert!(config.preserve);
    }

    #[test]
    fn test_invalid_buffer_size() {
        let args = CliArgs::parse_from(["bucketcopy", "/src", "/out", "-b", "tiny"]);
        assert!(SortConfig::from_cli(&args).is_err());
    }
}
