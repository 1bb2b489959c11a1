//! Extension and excluded-directory filtering.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

/// Build, IDE and version-control folders never bundled.
pub const EXCLUDED_DIRECTORIES: &[&str] = &["bin", "debug", "release", "obj", ".git", ".svn", ".vs"];

/// Directory names matched case-insensitively against every path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedDirectorySet {
    names: BTreeSet<String>,
}

impl ExcludedDirectorySet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, segment: &str) -> bool {
        self.names.contains(&segment.to_lowercase())
    }
}

impl Default for ExcludedDirectorySet {
    fn default() -> Self {
        Self::new(EXCLUDED_DIRECTORIES)
    }
}

/// Narrows discovered files to the allowed extensions outside excluded folders.
#[derive(Debug, Clone)]
pub struct FileFilter {
    extensions: Vec<String>,
    excluded: ExcludedDirectorySet,
}

impl FileFilter {
    pub fn new(allowed_extensions: &BTreeSet<String>, excluded: ExcludedDirectorySet) -> Self {
        Self {
            extensions: allowed_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            excluded,
        }
    }

    /// Keep the files under `root` that pass both checks. Input order is
    /// preserved; no sorting happens here.
    pub fn filter(&self, files: Vec<PathBuf>, root: &Path) -> Vec<PathBuf> {
        files
            .into_iter()
            .filter(|path| self.accepts(path, root))
            .collect()
    }

    pub fn accepts(&self, path: &Path, root: &Path) -> bool {
        if self.in_excluded_directory(path, root) {
            return false;
        }
        self.has_allowed_extension(path)
    }

    fn in_excluded_directory(&self, path: &Path, root: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        relative.components().any(|component| match component {
            Component::Normal(segment) => self.excluded.contains(&segment.to_string_lossy()),
            _ => false,
        })
    }

    // Suffix match on the whole path, so extensions must carry their dot.
    fn has_allowed_extension(&self, path: &Path) -> bool {
        let lowered = path.to_string_lossy().to_lowercase();
        self.extensions.iter().any(|ext| lowered.ends_with(ext.as_str()))
    }
}
