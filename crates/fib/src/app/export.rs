//! Writing the composed bundle to disk.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::errors::UsageError;

/// Resolves output paths against a base directory and persists bundles.
#[derive(Debug, Clone)]
pub struct BundleWriter {
    base: PathBuf,
}

impl BundleWriter {
    /// Writer resolving relative paths against `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        }
    }

    /// Check up front that `path` can be written, without leaving anything
    /// behind. A new file is created and removed again; an existing file is
    /// opened for writing but not truncated.
    pub fn probe(&self, path: &Path) -> Result<PathBuf, UsageError> {
        if path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(UsageError::EmptyOutput);
        }

        let resolved = self.resolve(path);
        if let Some(parent) = resolved.parent()
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            return Err(UsageError::MissingOutputDirectory(parent.to_path_buf()));
        }

        let not_writable = |source| UsageError::OutputNotWritable {
            path: resolved.clone(),
            source,
        };

        if resolved.exists() {
            OpenOptions::new()
                .write(true)
                .open(&resolved)
                .map_err(not_writable)?;
        } else {
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&resolved)
                .map_err(not_writable)?;
            fs::remove_file(&resolved).map_err(not_writable)?;
        }

        Ok(resolved)
    }

    /// Overwrite the file at `path` with `content`, returning the absolute
    /// location written. Missing directories are not created.
    pub fn write(&self, path: &Path, content: &str) -> Result<PathBuf> {
        let resolved = self.resolve(path);
        fs::write(&resolved, content)
            .with_context(|| format!("failed to write bundle to {}", resolved.display()))?;
        tracing::debug!(path = %resolved.display(), bytes = content.len(), "bundle written");
        Ok(resolved)
    }
}
