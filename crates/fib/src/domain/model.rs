//! Domain models for bundle options and composed bundles.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Longest author name accepted for the bundle header.
pub const MAX_AUTHOR_LEN: usize = 100;

/// Ordering applied to the filtered file list before composing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum SortMode {
    /// Alphabetical by file name.
    #[default]
    #[serde(rename = "name")]
    #[value(name = "name")]
    ByName,
    /// By file extension first, then by file name.
    #[serde(rename = "type")]
    #[value(name = "type")]
    ByType,
}

impl SortMode {
    /// Stable identifier used on the command line and in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::ByName => "name",
            SortMode::ByType => "type",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = SortModeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "name" => Ok(SortMode::ByName),
            "type" => Ok(SortMode::ByType),
            other => Err(SortModeParseError::UnknownMode(other.to_string())),
        }
    }
}

/// Error returned when parsing a [`SortMode`] fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum SortModeParseError {
    #[error("invalid sort order '{0}': allowed values are 'name' or 'type'")]
    UnknownMode(String),
}

/// Validated inputs for a single bundle run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    /// Lowercased language identifiers, or the `all` sentinel.
    pub languages: BTreeSet<String>,
    /// Absolute path of the bundle file.
    pub output: PathBuf,
    pub include_source_note: bool,
    pub sort_mode: SortMode,
    pub remove_empty_lines: bool,
    pub author: Option<String>,
}

/// A file that was selected but could not be read while composing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Composed bundle text plus the files that made it in, in final order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    pub text: String,
    pub files: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}
