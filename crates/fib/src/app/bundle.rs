//! The `bundle` pipeline: discover, filter, sort, compose, write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::compose::BundleComposer;
use crate::app::export::BundleWriter;
use crate::app::filter::{ExcludedDirectorySet, FileFilter};
use crate::app::scan::Scanner;
use crate::app::sort::sort_files;
use crate::domain::languages::LanguageRegistry;
use crate::domain::model::{Bundle, BundleOptions};

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct BundleReport {
    pub output: PathBuf,
    pub bundle: Bundle,
}

/// Runs every stage of a bundle in sequence for one scan root.
#[derive(Debug)]
pub struct BundlePipeline<'a> {
    registry: &'a LanguageRegistry,
    scanner: Scanner,
    excluded: ExcludedDirectorySet,
    writer: BundleWriter,
}

impl<'a> BundlePipeline<'a> {
    pub fn new(registry: &'a LanguageRegistry, writer: BundleWriter) -> Self {
        Self {
            registry,
            scanner: Scanner::new(),
            excluded: ExcludedDirectorySet::default(),
            writer,
        }
    }

    /// Select, order and compose the files under `root` without writing.
    pub fn build(&self, root: &Path, options: &BundleOptions) -> Result<Bundle> {
        let languages: Vec<&str> = options.languages.iter().map(String::as_str).collect();
        let extensions = self.registry.resolve_extensions(&languages);
        tracing::debug!(?extensions, "resolved extensions");

        let discovered = self
            .scanner
            .list_all_files(root)
            .context("failed to scan source directory")?;
        let discovered_count = discovered.len();

        let filter = FileFilter::new(&extensions, self.excluded.clone());
        let mut selected = filter.filter(discovered, root);
        // A previous bundle must not be folded into the next one.
        selected.retain(|path| path != &options.output);
        sort_files(&mut selected, options.sort_mode);

        tracing::info!(
            discovered = discovered_count,
            selected = selected.len(),
            sort = %options.sort_mode,
            "selected files"
        );
        for path in &selected {
            tracing::debug!(path = %path.display(), "including");
        }

        Ok(BundleComposer::new(root).compose(&selected, options))
    }

    /// Build the bundle and persist it to `options.output`.
    pub fn run(&self, root: &Path, options: &BundleOptions) -> Result<BundleReport> {
        let bundle = self.build(root, options)?;
        let output = self.writer.write(&options.output, &bundle.text)?;
        tracing::info!(
            output = %output.display(),
            files = bundle.files.len(),
            skipped = bundle.skipped.len(),
            "bundle created"
        );
        Ok(BundleReport { output, bundle })
    }
}
