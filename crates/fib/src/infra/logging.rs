//! Tracing subscriber setup.

use tracing::Level;

/// Verbosity requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (true, _) => Verbosity::Verbose,
            (false, true) => Verbosity::Quiet,
            (false, false) => Verbosity::Normal,
        }
    }

    pub fn level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::WARN,
            Verbosity::Normal => Level::INFO,
            Verbosity::Verbose => Level::DEBUG,
        }
    }
}

/// Install the global fmt subscriber, logging to stderr so stdout stays
/// free for command output. Later calls are no-ops.
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(verbosity.level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_quiet() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true).level(), Level::WARN);
        assert_eq!(Verbosity::from_flags(false, false).level(), Level::INFO);
    }
}
