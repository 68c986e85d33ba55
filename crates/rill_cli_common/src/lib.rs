#![doc = include_str!("../README.md")]

use clap::{value_parser, ArgAction, Args};

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct LoggingArgs {
    /// Log more, `-vv` logs everything
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Log less, `-qq` turns logging off
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// How far from the default level `-v` and `-q` moved logging, between `-2` and `2`
    pub fn verbosity(&self) -> i8 {
        (self.verbose.min(2) as i8) - (self.quiet.min(2) as i8)
    }

    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used
    #[cfg(feature = "tracing")]
    pub fn log_level_filter(&self) -> tracing::level_filters::LevelFilter {
        use tracing::level_filters::LevelFilter;
        match self.verbosity() {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            2..=i8::MAX => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[clap(flatten)]
        logging: LoggingArgs,
    }

    fn verbosity(args: &[&str]) -> i8 {
        TestArgs::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .expect("args should parse")
            .logging
            .verbosity()
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(verbosity(&[]), 0);
        assert_eq!(verbosity(&["-v"]), 1);
        assert_eq!(verbosity(&["-vv"]), 2);
        assert_eq!(verbosity(&["-q"]), -1);
        assert_eq!(verbosity(&["-qq"]), -2);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(TestArgs::try_parse_from(["test", "-v", "-q"]).is_err());
    }
}
