//! Interactive creation of response files for the `bundle` command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::errors::UsageError;
use crate::domain::languages::LanguageRegistry;
use crate::domain::model::{MAX_AUTHOR_LEN, SortMode};
use crate::infra::prompt::Prompter;

/// Answers collected for a response file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RspAnswers {
    pub languages: Vec<String>,
    pub output: Option<String>,
    pub note: bool,
    pub sort: Option<SortMode>,
    pub remove_empty_lines: bool,
    pub author: Option<String>,
}

impl RspAnswers {
    /// Render the answers as `bundle` arguments on a single line, e.g.
    /// ` -l python rust  -o out.txt -n -s name -r -a "Jane Doe" `.
    pub fn command_line(&self) -> String {
        let mut text = format!(" -l {} ", self.languages.join(" "));
        text.push(' ');
        if let Some(output) = &self.output {
            text.push_str(&format!("-o {} ", quote_if_needed(output)));
        }
        if self.note {
            text.push_str("-n ");
        }
        if let Some(sort) = self.sort {
            text.push_str(&format!("-s {sort} "));
        }
        if self.remove_empty_lines {
            text.push_str("-r ");
        }
        if let Some(author) = &self.author {
            text.push_str(&format!("-a {} ", quote(author)));
        }
        text
    }
}

/// Walks the user through the `bundle` options and saves them as a
/// response file in `base`.
pub struct ResponseFileBuilder<'a> {
    registry: &'a LanguageRegistry,
    base: PathBuf,
}

impl<'a> ResponseFileBuilder<'a> {
    pub fn new(registry: &'a LanguageRegistry, base: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            base: base.into(),
        }
    }

    /// Ask every question, then write the response file. Returns its path.
    pub fn run(&self, prompter: &mut dyn Prompter) -> Result<PathBuf> {
        let answers = self.collect(prompter)?;
        let name = prompter.ask("Enter the response file name (only file name, no path):")?;
        self.save(name.trim(), &answers)
    }

    pub fn collect(&self, prompter: &mut dyn Prompter) -> Result<RspAnswers> {
        let languages_raw = prompter.ask("Enter the programming languages (separated by spaces):")?;
        let languages: Vec<String> = languages_raw.split_whitespace().map(str::to_owned).collect();
        self.registry.validate(&languages)?;

        let output = non_empty(prompter.ask("Enter the output file path:")?);
        let note = is_yes(&prompter.ask("Include source file path as comment? (yes/no):")?);

        let sort = match non_empty(prompter.ask("Enter the sort order ('name' or 'type'):")?) {
            Some(value) => Some(value.parse::<SortMode>().map_err(UsageError::from)?),
            None => None,
        };

        let remove_empty_lines = is_yes(&prompter.ask("Remove empty lines? (yes/no):")?);

        let author = non_empty(prompter.ask("Enter the author name:")?);
        if let Some(author) = &author {
            let len = author.chars().count();
            if len > MAX_AUTHOR_LEN {
                return Err(UsageError::AuthorTooLong { len, max: MAX_AUTHOR_LEN }.into());
            }
        }

        Ok(RspAnswers {
            languages,
            output,
            note,
            sort,
            remove_empty_lines,
            author,
        })
    }

    pub fn save(&self, name: &str, answers: &RspAnswers) -> Result<PathBuf> {
        if name.is_empty() {
            return Err(UsageError::EmptyResponseFileName.into());
        }
        let path = self.base.join(Path::new(name));
        fs::write(&path, answers.command_line())
            .with_context(|| format!("failed to save the response file {}", path.display()))?;
        tracing::info!(path = %path.display(), "response file saved");
        Ok(path)
    }
}

fn non_empty(answer: String) -> Option<String> {
    let trimmed = answer.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "yes" | "y")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn quote_if_needed(value: &str) -> String {
    if value.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
        quote(value)
    } else {
        value.to_owned()
    }
}
