//! Recursive file discovery under a scan root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::{DirEntry, WalkBuilder};

/// Walks a directory tree and lists every regular file beneath it.
///
/// No ignore files, hidden-file rules or size limits apply: filtering is left
/// to [`crate::app::filter::FileFilter`].
#[derive(Debug, Default)]
pub struct Scanner;

impl Scanner {
    pub fn new() -> Self {
        Self
    }

    /// List all files under `root`. Order is whatever the walker yields.
    ///
    /// An unreadable root is fatal; unreadable entries below it are logged
    /// and skipped. Symlinks to files are listed, symlinked directories are
    /// not descended into.
    pub fn list_all_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        fs::read_dir(root)
            .with_context(|| format!("failed to read scan root {}", root.display()))?;

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .build();

        let mut files = Vec::new();
        for result in walker {
            match result {
                Ok(entry) => {
                    if is_file(&entry) {
                        files.push(entry.into_path());
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable entry");
                }
            }
        }

        tracing::debug!(root = %root.display(), count = files.len(), "discovered files");
        Ok(files)
    }
}

fn is_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_some_and(|kind| kind.is_file()) {
        return true;
    }
    if !entry.path_is_symlink() {
        return false;
    }
    match fs::metadata(entry.path()) {
        Ok(metadata) => metadata.is_file(),
        Err(err) => {
            tracing::debug!(path = %entry.path().display(), error = %err, "skipping dangling symlink");
            false
        }
    }
}
