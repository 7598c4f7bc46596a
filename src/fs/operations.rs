//! File copy operations
//!
//! Blocking byte copy with buffered I/O and best-effort attribute
//! preservation. These run on worker threads, never on the scheduler.

use crate::error::{IoResultExt, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Copy operation statistics
#[derive(Debug, Clone, Default)]
pub struct CopyStats {
    /// Bytes copied
    pub bytes_copied: u64,
    /// Duration of the copy
    pub duration: std::time::Duration,
    /// Throughput in bytes/second
    pub throughput: f64,
}

impl CopyStats {
    /// Calculate throughput from bytes and duration
    pub fn calculate_throughput(&mut self) {
        if self.duration.as_secs_f64() > 0.0 {
            self.throughput = self.bytes_copied as f64 / self.duration.as_secs_f64();
        }
    }
}

/// Options for file copy operations
#[derive(Debug, Clone)]
pub struct CopyOptions {
    /// Buffer size for buffered operations
    pub buffer_size: usize,
    /// Preserve file permissions
    pub preserve_permissions: bool,
    /// Preserve modification time
    pub preserve_mtime: bool,
    /// Preallocate destination file
    pub preallocate: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            buffer_size: 1024 * 1024, // 1MB
            preserve_permissions: true,
            preserve_mtime: true,
            preallocate: true,
        }
    }
}

/// Buffered file copier
pub struct FileCopier {
    options: CopyOptions,
}

impl FileCopier {
    /// Create a new file copier with the given options
    pub fn new(options: CopyOptions) -> Self {
        Self { options }
    }

    /// Create with default options
    pub fn default_copier() -> Self {
        Self::new(CopyOptions::default())
    }

    /// Copy a file from source to destination, overwriting an existing
    /// destination without warning.
    pub fn copy(&self, source: &Path, dest: &Path) -> Result<CopyStats> {
        let start = std::time::Instant::now();

        let bytes_copied = self.copy_buffered(source, dest)?;

        if self.options.preserve_permissions {
            self.copy_permissions(source, dest)?;
        }

        if self.options.preserve_mtime {
            self.copy_mtime(source, dest)?;
        }

        let mut stats = CopyStats {
            bytes_copied,
            duration: start.elapsed(),
            throughput: 0.0,
        };
        stats.calculate_throughput();

        Ok(stats)
    }

    /// Buffered copy
    fn copy_buffered(&self, source: &Path, dest: &Path) -> Result<u64> {
        let src_file = File::open(source).with_path(source)?;
        let dst_file = File::create(dest).with_path(dest)?;

        if self.options.preallocate {
            let size = src_file.metadata().with_path(source)?.len();
            if size > 0 {
                let _ = dst_file.set_len(size);
            }
        }

        let mut reader = BufReader::with_capacity(self.options.buffer_size, src_file);
        let mut writer = BufWriter::with_capacity(self.options.buffer_size, dst_file);

        let bytes_copied = std::io::copy(&mut reader, &mut writer).with_path(source)?;

        writer.flush().with_path(dest)?;

        Ok(bytes_copied)
    }

    /// Copy file permissions
    fn copy_permissions(&self, source: &Path, dest: &Path) -> Result<()> {
        let metadata = std::fs::metadata(source).with_path(source)?;
        std::fs::set_permissions(dest, metadata.permissions()).with_path(dest)?;
        Ok(())
    }

    /// Copy modification and access times, best effort
    fn copy_mtime(&self, source: &Path, dest: &Path) -> Result<()> {
        let metadata = std::fs::metadata(source).with_path(source)?;

        if let Ok(mtime) = metadata.modified() {
            let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime));
        }

        if let Ok(atime) = metadata.accessed() {
            let _ = filetime::set_file_atime(dest, filetime::FileTime::from_system_time(atime));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    fn write_file(path: &Path, content: &[u8]) {
        let mut f = File::create(path).unwrap();
        f.write_all(content).unwrap();
    }

    fn read_file(path: &Path) -> Vec<u8> {
        let mut buf = Vec::new();
        File::open(path).unwrap().read_to_end(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_copy_content() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.bin");
        let dst = dir.path().join("dst.bin");
        write_file(&src, &vec![0xABu8; 64 * 1024]);

        let stats = FileCopier::default_copier().copy(&src, &dst).unwrap();

        assert_eq!(stats.bytes_copied, 64 * 1024);
        assert_eq!(read_file(&dst), vec![0xABu8; 64 * 1024]);
    }

    #[test]
    fn test_copy_empty_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("empty");
        let dst = dir.path().join("empty_copy");
        write_file(&src, b"");

        let stats = FileCopier::default_copier().copy(&src, &dst).unwrap();

        assert_eq!(stats.bytes_copied, 0);
        assert!(dst.exists());
    }

    #[test]
    fn test_copy_overwrites_destination() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.txt");
        let dst = dir.path().join("dst.txt");
        write_file(&src, b"new content");
        write_file(&dst, b"old content that is longer");

        FileCopier::default_copier().copy(&src, &dst).unwrap();

        assert_eq!(read_file(&dst), b"new content");
    }

    #[test]
    fn test_copy_preserves_mtime() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.txt");
        let dst = dir.path().join("dst.txt");
        write_file(&src, b"content");

        let past = filetime::FileTime::from_unix_time(1_500_000_000, 0);
        filetime::set_file_mtime(&src, past).unwrap();

        FileCopier::default_copier().copy(&src, &dst).unwrap();

        let dst_mtime = filetime::FileTime::from_last_modification_time(
            &std::fs::metadata(&dst).unwrap(),
        );
        assert_eq!(dst_mtime.unix_seconds(), 1_500_000_000);
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("missing");
        let dst = dir.path().join("dst");

        let err = FileCopier::default_copier().copy(&src, &dst).unwrap_err();
        assert_eq!(err.path().unwrap(), &src);
    }
}
