use clap::Parser;

use fib::cli::Cli;
use fib::infra::logging::Verbosity;

fn main() -> anyhow::Result<()> {
    let expanded = fib::cli::expand_args(std::env::args_os())?;
    let cli = Cli::parse_from(expanded.args);
    fib::init(Verbosity::from_flags(cli.verbose, cli.quiet));

    for (path, count) in &expanded.response_files {
        tracing::debug!(path = %path.display(), count, "expanded response file");
    }

    fib::cli::run(cli)
}
