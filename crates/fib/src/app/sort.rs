//! Deterministic ordering of the filtered file list.

use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::domain::model::SortMode;

/// Sort `files` in place according to `mode`.
///
/// Extensions and file names compare case-insensitively, so `.PY` groups
/// with `.py`. Ties fall back to the exact file name and then the full path,
/// so distinct files never compare equal and the result only depends on the
/// input set.
pub fn sort_files(files: &mut [PathBuf], mode: SortMode) {
    match mode {
        SortMode::ByName => files.sort_by(|a, b| by_name(a, b)),
        SortMode::ByType => files.sort_by(|a, b| {
            folded(extension(a))
                .cmp(&folded(extension(b)))
                .then_with(|| by_name(a, b))
        }),
    }
}

fn by_name(a: &Path, b: &Path) -> Ordering {
    let (name_a, name_b) = (file_name(a), file_name(b));
    folded(name_a)
        .cmp(&folded(name_b))
        .then_with(|| name_a.cmp(name_b))
        .then_with(|| a.cmp(b))
}

fn folded(value: &OsStr) -> String {
    value.to_string_lossy().to_lowercase()
}

fn file_name(path: &Path) -> &OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}

fn extension(path: &Path) -> &OsStr {
    path.extension().unwrap_or_default()
}
