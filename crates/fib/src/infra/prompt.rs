//! Line prompts for interactive commands.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

/// Source of answers for a sequence of questions.
pub trait Prompter {
    /// Show `question` and return the answer without its line terminator.
    /// End of input yields an empty answer.
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Prompts on the controlling terminal.
///
/// Uses a line editor when stdin is a terminal and plain line reads
/// otherwise, so answers can be piped in.
pub struct TerminalPrompter {
    editor: Option<Reedline>,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        let editor = io::stdin().is_terminal().then(Reedline::create);
        Self { editor }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        let Some(editor) = self.editor.as_mut() else {
            let stdin = io::stdin();
            return LinePrompter::new(stdin.lock(), io::stdout()).ask(question);
        };

        println!("{question}");
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(String::new()),
            DefaultPromptSegment::Empty,
        );
        match editor.read_line(&prompt).context("failed to read answer")? {
            Signal::Success(buffer) => Ok(buffer),
            _ => bail!("aborted by user"),
        }
    }
}

/// Prompts over arbitrary reader/writer pairs.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        writeln!(self.writer, "{question}").context("failed to write prompt")?;
        self.writer.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .context("failed to read answer")?;
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}
