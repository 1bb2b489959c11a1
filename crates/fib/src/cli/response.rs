//! Expansion of `@file` response-file arguments.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Arguments after response-file expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedArgs {
    pub args: Vec<OsString>,
    /// Response files read, with the number of tokens each contributed.
    pub response_files: Vec<(PathBuf, usize)>,
}

/// Replace every `@path` argument with the tokens stored in that file.
///
/// Tokens read from a response file are not expanded again. This runs before
/// logging is set up, so the files read are returned rather than logged.
pub fn expand_args<I>(args: I) -> Result<ExpandedArgs>
where
    I: IntoIterator<Item = OsString>,
{
    let mut expanded = ExpandedArgs::default();
    for arg in args {
        match arg.to_str().and_then(|value| value.strip_prefix('@')) {
            Some(path) if !path.is_empty() => {
                let path = PathBuf::from(path);
                let tokens = read_response_file(&path)?;
                expanded.response_files.push((path, tokens.len()));
                expanded.args.extend(tokens.into_iter().map(OsString::from));
            }
            _ => expanded.args.push(arg),
        }
    }
    Ok(expanded)
}

fn read_response_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read response file {}", path.display()))?;
    tokenize(&text).with_context(|| format!("invalid response file {}", path.display()))
}

/// Split response-file text into arguments.
///
/// Whitespace separates tokens, double quotes group (with `\"` and `\\`
/// escapes), single quotes group literally, and lines starting with `#` are
/// comments. Quotes do not span lines.
pub fn tokenize(text: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();

    for (number, line) in text.lines().enumerate() {
        if line.trim_start().starts_with('#') {
            continue;
        }

        let mut current = String::new();
        let mut in_token = false;
        let mut chars = line.chars();

        while let Some(c) = chars.next() {
            match c {
                '"' => {
                    in_token = true;
                    loop {
                        match chars.next() {
                            Some('"') => break,
                            Some('\\') => match chars.next() {
                                Some(escaped @ ('"' | '\\')) => current.push(escaped),
                                Some(other) => {
                                    current.push('\\');
                                    current.push(other);
                                }
                                None => bail!("unterminated quote on line {}", number + 1),
                            },
                            Some(other) => current.push(other),
                            None => bail!("unterminated quote on line {}", number + 1),
                        }
                    }
                }
                '\'' => {
                    in_token = true;
                    loop {
                        match chars.next() {
                            Some('\'') => break,
                            Some(other) => current.push(other),
                            None => bail!("unterminated quote on line {}", number + 1),
                        }
                    }
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                other => {
                    in_token = true;
                    current.push(other);
                }
            }
        }

        if in_token {
            tokens.push(current);
        }
    }

    Ok(tokens)
}
