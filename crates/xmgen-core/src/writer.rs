//! Output writer for the emitted artifact
//!
//! Writes the fully aggregated text verbatim to its destination, with
//! dry-run preview and optional backup of an existing file. This is the
//! only place in the crate that touches the filesystem after spec load.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::GenError;

/// Configuration for output writing.
#[derive(Debug, Clone)]
pub struct OutputWriterConfig {
    /// Preview only: report what would be written, touch nothing
    pub dry_run: bool,
    /// Copy an existing destination aside to `<name>.bak` before
    /// overwriting it
    pub create_backups: bool,
}

impl Default for OutputWriterConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            create_backups: true,
        }
    }
}

/// Result of one write.
#[derive(Debug, Clone)]
pub struct FileWriteResult {
    /// Destination path
    pub path: PathBuf,
    /// Whether the file was actually written
    pub written: bool,
    /// Backup file, if one was created
    pub backup_path: Option<PathBuf>,
    /// Whether this was a dry-run
    pub dry_run: bool,
}

/// Writes generated text to a destination file.
#[derive(Debug, Clone, Default)]
pub struct OutputWriter {
    config: OutputWriterConfig,
}

impl OutputWriter {
    /// Writer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer with custom configuration.
    pub fn with_config(config: OutputWriterConfig) -> Self {
        Self { config }
    }

    /// Write `text` to `path` verbatim.
    ///
    /// Parent directories are created as needed. In dry-run mode nothing is
    /// touched and the result reports `written: false`.
    pub fn write(&self, text: &str, path: &Path) -> Result<FileWriteResult, GenError> {
        if self.config.dry_run {
            debug!(path = %path.display(), bytes = text.len(), "dry-run, skipping write");
            return Ok(FileWriteResult {
                path: path.to_path_buf(),
                written: false,
                backup_path: None,
                dry_run: true,
            });
        }

        let wrap = |source: std::io::Error| GenError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(wrap)?;
            }
        }

        let backup_path = if self.config.create_backups && path.exists() {
            let backup = backup_path_for(path);
            fs::copy(path, &backup).map_err(wrap)?;
            Some(backup)
        } else {
            None
        };

        fs::write(path, text).map_err(wrap)?;
        debug!(path = %path.display(), bytes = text.len(), "wrote artifact");

        Ok(FileWriteResult {
            path: path.to_path_buf(),
            written: true,
            backup_path,
            dry_run: false,
        })
    }
}

fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}
