//! Domain-specific errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::model::SortModeParseError;

/// Invalid user input, reported before any bundling I/O takes place.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("you must specify at least one language or use 'all'")]
    NoLanguages,
    #[error(
        "invalid languages specified: {}. Allowed languages are: {} or 'all'",
        .invalid.join(", "),
        .allowed.join(", ")
    )]
    UnknownLanguages {
        invalid: Vec<String>,
        allowed: Vec<String>,
    },
    #[error("the output path cannot be empty")]
    EmptyOutput,
    #[error("the directory '{}' does not exist", .0.display())]
    MissingOutputDirectory(PathBuf),
    #[error("invalid output path '{}': {source}", .path.display())]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("author name cannot exceed {max} characters (got {len})")]
    AuthorTooLong { len: usize, max: usize },
    #[error(transparent)]
    InvalidSort(#[from] SortModeParseError),
    #[error("the response file name cannot be empty")]
    EmptyResponseFileName,
}
