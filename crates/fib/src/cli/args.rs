//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::model::SortMode;

/// Bundle the source files of a directory tree into a single text file.
#[derive(Debug, Parser)]
#[command(name = "fib", author, version, long_about = None)]
#[command(after_help = "Arguments can be replayed from a response file: fib bundle @options.rsp")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bundles files into a single output file
    Bundle(BundleArgs),

    /// Create a response file for the bundle command
    #[command(name = "create-rsp")]
    CreateRsp,

    /// List supported languages and their file extensions
    Languages(LanguagesArgs),

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Args)]
pub struct BundleArgs {
    /// Programming languages to include in the bundle. Use 'all' to include all code files
    #[arg(short = 'l', long = "lang", value_name = "LANG", num_args = 1.., required = true)]
    pub languages: Vec<String>,

    /// Output file name or full path for the bundled file [default: bundle.txt]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Include the source file path as a comment before each file
    #[arg(short, long, overrides_with = "no_note")]
    pub note: bool,

    /// Leave out source path comments even if the config enables them
    #[arg(long, overrides_with = "note")]
    pub no_note: bool,

    /// Sort order: 'name' for file name, 'type' for extension then name [default: name]
    #[arg(short, long, value_enum)]
    pub sort: Option<SortMode>,

    /// Remove empty and whitespace-only lines from the source files
    #[arg(short, long, overrides_with = "no_remove_empty_lines")]
    pub remove_empty_lines: bool,

    /// Keep empty lines even if the config removes them
    #[arg(long, overrides_with = "remove_empty_lines")]
    pub no_remove_empty_lines: bool,

    /// Include the author's name as a comment at the top of the bundle
    #[arg(short, long)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct LanguagesArgs {
    /// Print the registry as JSON
    #[arg(long)]
    pub json: bool,
}
