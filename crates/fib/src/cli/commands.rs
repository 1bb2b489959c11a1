//! Command handlers.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;

use crate::app::bundle::BundlePipeline;
use crate::app::export::BundleWriter;
use crate::app::rsp::ResponseFileBuilder;
use crate::cli::args::{BundleArgs, Cli, Commands, LanguagesArgs};
use crate::domain::errors::UsageError;
use crate::domain::languages::LanguageRegistry;
use crate::domain::model::{BundleOptions, MAX_AUTHOR_LEN};
use crate::infra::config::Config;
use crate::infra::prompt::TerminalPrompter;

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Bundle(args) => bundle_command(&args),
        Commands::CreateRsp => create_rsp_command(),
        Commands::Languages(args) => languages_command(&args),
        Commands::Completions { shell } => completions_command(shell),
    }
}

fn bundle_command(args: &BundleArgs) -> Result<()> {
    let config = Config::load()?;
    let root = std::env::current_dir().context("unable to determine working directory")?;
    let registry = LanguageRegistry::builtin();
    let writer = BundleWriter::new(&root);

    let options = resolve_options(args, &config, registry, &writer)?;
    let report = BundlePipeline::new(registry, writer).run(&root, &options)?;

    println!("Bundle created successfully: {}", report.output.display());
    println!(
        "{} file(s) bundled, {} skipped",
        report.bundle.files.len(),
        report.bundle.skipped.len()
    );
    for skipped in &report.bundle.skipped {
        eprintln!("skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    Ok(())
}

/// Merge flags with configured defaults and validate everything before any
/// bundling I/O happens.
pub fn resolve_options(
    args: &BundleArgs,
    config: &Config,
    registry: &LanguageRegistry,
    writer: &BundleWriter,
) -> Result<BundleOptions, UsageError> {
    let languages = registry.validate(&args.languages)?;

    // The limit applies to the value as given, padding included.
    let author = args.author.clone().or_else(|| config.bundle.author());
    if let Some(author) = &author {
        let len = author.chars().count();
        if len > MAX_AUTHOR_LEN {
            return Err(UsageError::AuthorTooLong { len, max: MAX_AUTHOR_LEN });
        }
    }
    let author = author
        .map(|author| author.trim().to_owned())
        .filter(|author| !author.is_empty());

    let output_arg = args.output.clone().unwrap_or_else(|| config.bundle.output());
    let output = writer.probe(Path::new(output_arg.trim()))?;

    Ok(BundleOptions {
        languages,
        output,
        include_source_note: switch(args.note, args.no_note, config.bundle.note()),
        sort_mode: args.sort.unwrap_or_else(|| config.bundle.sort()),
        remove_empty_lines: switch(
            args.remove_empty_lines,
            args.no_remove_empty_lines,
            config.bundle.remove_empty_lines(),
        ),
        author,
    })
}

/// A boolean flag pair over a configured default.
fn switch(on: bool, off: bool, configured: bool) -> bool {
    !off && (on || configured)
}

fn create_rsp_command() -> Result<()> {
    let base = std::env::current_dir().context("unable to determine working directory")?;
    let builder = ResponseFileBuilder::new(LanguageRegistry::builtin(), base);
    let mut prompter = TerminalPrompter::new();

    let path = builder.run(&mut prompter)?;
    println!("Response file saved to {}", path.display());
    Ok(())
}

fn languages_command(args: &LanguagesArgs) -> Result<()> {
    let registry = LanguageRegistry::builtin();
    if args.json {
        let json = serde_json::to_string_pretty(registry.entries())
            .context("failed to serialize language registry")?;
        println!("{json}");
        return Ok(());
    }

    for entry in registry.entries() {
        println!("{:<12} {}", entry.identifier, entry.extensions.join(" "));
    }
    Ok(())
}

fn completions_command(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
