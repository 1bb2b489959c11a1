//! Static language registry mapping identifiers to file extensions.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::domain::errors::UsageError;

/// Sentinel selecting every registered language.
pub const ALL_LANGUAGES: &str = "all";

/// A language identifier and the extensions (with leading dot) it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    pub identifier: &'static str,
    pub extensions: &'static [&'static str],
}

const BUILTIN_LANGUAGES: &[LanguageEntry] = &[
    LanguageEntry { identifier: "csharp", extensions: &[".cs"] },
    LanguageEntry { identifier: "python", extensions: &[".py", ".ipynb"] },
    LanguageEntry { identifier: "javascript", extensions: &[".js", ".jsx"] },
    LanguageEntry { identifier: "java", extensions: &[".java"] },
    LanguageEntry { identifier: "html", extensions: &[".html", ".htm"] },
    LanguageEntry { identifier: "css", extensions: &[".css", ".scss", ".sass"] },
    LanguageEntry { identifier: "cpp", extensions: &[".cpp", ".h", ".hpp", ".c"] },
    LanguageEntry { identifier: "php", extensions: &[".php"] },
    LanguageEntry { identifier: "ruby", extensions: &[".rb"] },
    LanguageEntry { identifier: "go", extensions: &[".go"] },
    LanguageEntry { identifier: "typescript", extensions: &[".ts", ".tsx"] },
    LanguageEntry { identifier: "shell", extensions: &[".sh"] },
    LanguageEntry { identifier: "kotlin", extensions: &[".kt", ".kts"] },
    LanguageEntry { identifier: "swift", extensions: &[".swift"] },
    LanguageEntry { identifier: "rust", extensions: &[".rs"] },
];

static BUILTIN: Lazy<LanguageRegistry> = Lazy::new(|| LanguageRegistry::new(BUILTIN_LANGUAGES));

/// Immutable lookup table over [`LanguageEntry`] values.
///
/// Identifiers are matched case-insensitively. When two entries share an
/// identifier the first one wins.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    entries: &'static [LanguageEntry],
    index: BTreeMap<String, usize>,
}

impl LanguageRegistry {
    pub fn new(entries: &'static [LanguageEntry]) -> Self {
        let mut index = BTreeMap::new();
        for (position, entry) in entries.iter().enumerate() {
            index
                .entry(entry.identifier.to_ascii_lowercase())
                .or_insert(position);
        }
        Self { entries, index }
    }

    /// The process-wide registry of supported languages.
    pub fn builtin() -> &'static LanguageRegistry {
        &BUILTIN
    }

    pub fn entries(&self) -> &[LanguageEntry] {
        self.entries
    }

    /// Registered identifiers in table order.
    pub fn identifiers(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.identifier).collect()
    }

    pub fn lookup(&self, identifier: &str) -> Option<&LanguageEntry> {
        self.index
            .get(&identifier.trim().to_ascii_lowercase())
            .map(|&position| &self.entries[position])
    }

    /// Normalize requested identifiers, rejecting anything that is neither a
    /// registered language nor the `all` sentinel.
    pub fn validate<S: AsRef<str>>(
        &self,
        requested: &[S],
    ) -> Result<BTreeSet<String>, UsageError> {
        let normalized: Vec<String> = requested
            .iter()
            .map(|value| value.as_ref().trim().to_ascii_lowercase())
            .filter(|value| !value.is_empty())
            .collect();

        if normalized.is_empty() {
            return Err(UsageError::NoLanguages);
        }

        let invalid: Vec<String> = requested
            .iter()
            .map(|value| value.as_ref().trim())
            .filter(|value| !value.is_empty())
            .filter(|value| !is_all(value) && self.lookup(value).is_none())
            .map(str::to_owned)
            .collect();

        if !invalid.is_empty() {
            return Err(UsageError::UnknownLanguages {
                invalid,
                allowed: self.identifiers().into_iter().map(str::to_owned).collect(),
            });
        }

        Ok(normalized.into_iter().collect())
    }

    /// Union of the extensions of every requested language. The `all`
    /// sentinel selects the whole table; unknown identifiers contribute
    /// nothing and are expected to be rejected by [`Self::validate`] first.
    pub fn resolve_extensions<S: AsRef<str>>(&self, requested: &[S]) -> BTreeSet<String> {
        let wants_all = requested.iter().any(|value| is_all(value.as_ref()));

        let selected: Vec<&LanguageEntry> = if wants_all {
            self.entries.iter().collect()
        } else {
            requested
                .iter()
                .filter_map(|value| self.lookup(value.as_ref()))
                .collect()
        };

        selected
            .into_iter()
            .flat_map(|entry| entry.extensions.iter())
            .map(|ext| ext.to_ascii_lowercase())
            .collect()
    }
}

fn is_all(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(ALL_LANGUAGES)
}
