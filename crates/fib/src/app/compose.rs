//! Bundle text composition.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::model::{Bundle, BundleOptions, SkippedFile};

const COMMENT_PREFIX: &str = "//";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Concatenates file contents into a single bundle.
///
/// Source-path notes are rendered relative to `root` when the file lives
/// beneath it.
#[derive(Debug, Clone)]
pub struct BundleComposer {
    root: PathBuf,
}

impl BundleComposer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Build the bundle text for `files` in the given order.
    ///
    /// Files that cannot be read or are not valid UTF-8 are left out of the
    /// text, recorded in [`Bundle::skipped`] and logged; the rest of the
    /// bundle is still produced.
    pub fn compose(&self, files: &[PathBuf], options: &BundleOptions) -> Bundle {
        let mut bundle = Bundle::default();

        if let Some(author) = options.author.as_deref().map(str::trim)
            && !author.is_empty()
        {
            push_line(&mut bundle.text, &format!("{COMMENT_PREFIX} Author: {author}"));
        }

        for path in files {
            let contents = match read_source(path) {
                Ok(contents) => contents,
                Err(err) => {
                    let reason = format!("{err:#}");
                    tracing::warn!(path = %path.display(), error = %reason, "skipping unreadable file");
                    bundle.skipped.push(SkippedFile {
                        path: path.clone(),
                        reason,
                    });
                    continue;
                }
            };

            if options.include_source_note {
                let note = format!("{COMMENT_PREFIX} Source: {}", self.display_path(path));
                push_line(&mut bundle.text, &note);
            }

            for line in universal_lines(&contents) {
                if options.remove_empty_lines && line.trim().is_empty() {
                    continue;
                }
                push_line(&mut bundle.text, line);
            }

            // Separator between files.
            push_line(&mut bundle.text, "");
            bundle.files.push(path.clone());
        }

        bundle
    }

    fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

fn push_line(buffer: &mut String, line: &str) {
    buffer.push_str(line);
    buffer.push('\n');
}

fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut text = String::from_utf8(bytes)
        .with_context(|| format!("{} is not valid UTF-8 text", path.display()))?;
    if text.starts_with(BYTE_ORDER_MARK) {
        text.remove(0);
    }
    Ok(text)
}

/// Split on `\r\n`, `\n` or a lone `\r`. A trailing terminator does not
/// produce an extra empty line.
pub fn universal_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(idx) => {
                let line = &rest[..idx];
                let skip = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::model::SortMode;

    fn options() -> BundleOptions {
        BundleOptions {
            languages: ["python".to_string()].into_iter().collect(),
            output: PathBuf::from("/tmp/bundle.txt"),
            include_source_note: false,
            sort_mode: SortMode::ByName,
            remove_empty_lines: false,
            author: None,
        }
    }

    #[test]
    fn splits_universal_newlines_without_trailing_empty_line() {
        let lines: Vec<&str> = universal_lines("a\r\nb\rc\n\nd\n").collect();
        assert_eq!(lines, vec!["a", "b", "c", "", "d"]);
        assert_eq!(universal_lines("").count(), 0);
        assert_eq!(universal_lines("\n").collect::<Vec<_>>(), vec![""]);
        assert_eq!(universal_lines("solo").collect::<Vec<_>>(), vec!["solo"]);
    }

    #[test]
    fn blank_line_accounting_is_exact() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let a = temp.path().join("a.py");
        let b = temp.path().join("b.py");
        fs::write(&a, "print(1)")?;
        fs::write(&b, "print(2)\n\n")?;

        let bundle = BundleComposer::new(temp.path()).compose(&[a.clone(), b.clone()], &options());

        assert_eq!(bundle.text, "print(1)\n\nprint(2)\n\n\n");
        assert_eq!(bundle.files, vec![a, b]);
        assert!(bundle.skipped.is_empty());
        Ok(())
    }

    #[test]
    fn author_header_is_emitted_once_even_without_files() {
        let mut opts = options();
        opts.author = Some("Jane Doe".into());

        let bundle = BundleComposer::new("/nowhere").compose(&[], &opts);
        assert_eq!(bundle.text, "// Author: Jane Doe\n");
    }

    #[test]
    fn blank_author_emits_no_header() {
        let mut opts = options();
        opts.author = Some("   ".into());

        let bundle = BundleComposer::new("/nowhere").compose(&[], &opts);
        assert!(bundle.text.is_empty());
    }

    #[test]
    fn remove_empty_lines_keeps_only_separators_blank() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let a = temp.path().join("a.rs");
        let b = temp.path().join("b.rs");
        fs::write(&a, "fn a() {}\n\n   \n\t\nconst X: u8 = 1;\r\n")?;
        fs::write(&b, "\n\nfn b() {}\n")?;

        let mut opts = options();
        opts.remove_empty_lines = true;
        let bundle = BundleComposer::new(temp.path()).compose(&[a, b], &opts);

        assert_eq!(bundle.text, "fn a() {}\nconst X: u8 = 1;\n\nfn b() {}\n\n");
        Ok(())
    }

    #[test]
    fn source_note_precedes_each_file_relative_to_root() -> Result<()> {
        let temp = tempfile::tempdir()?;
        fs::create_dir_all(temp.path().join("pkg"))?;
        let file = temp.path().join("pkg/mod.py");
        fs::write(&file, "x = 1\n")?;

        let mut opts = options();
        opts.include_source_note = true;
        opts.author = Some("Ada".into());
        let bundle = BundleComposer::new(temp.path()).compose(&[file], &opts);

        insta::assert_snapshot!(bundle.text.trim_end(), @r"
        // Author: Ada
        // Source: pkg/mod.py
        x = 1
        ");
        Ok(())
    }

    #[test]
    fn unreadable_files_are_skipped_and_reported() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let good = temp.path().join("good.py");
        let missing = temp.path().join("missing.py");
        let binary = temp.path().join("blob.py");
        fs::write(&good, "ok = True\n")?;
        fs::write(&binary, [0xff_u8, 0xfe, 0x00, 0x80])?;

        let bundle = BundleComposer::new(temp.path()).compose(
            &[missing.clone(), good.clone(), binary.clone()],
            &options(),
        );

        assert_eq!(bundle.text, "ok = True\n\n");
        assert_eq!(bundle.files, vec![good]);
        let skipped: Vec<_> = bundle.skipped.iter().map(|s| s.path.clone()).collect();
        assert_eq!(skipped, vec![missing, binary]);
        assert!(bundle.skipped[1].reason.contains("UTF-8"));
        Ok(())
    }

    #[test]
    fn byte_order_mark_is_dropped() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("bom.cs");
        fs::write(&file, "\u{feff}class A {}\r\n")?;

        let bundle = BundleComposer::new(temp.path()).compose(&[file], &options());
        assert_eq!(bundle.text, "class A {}\n\n");
        Ok(())
    }
}
