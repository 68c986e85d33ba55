//! the args for running rillc

use rill_ast_parsing::parser::{ParserConfig, RedeclarationPolicy};
use rill_cli_common::LoggingArgs;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Runs the rill front end over rill source files")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// Source files, or directories to search for `.rill` files
    #[clap(required = true, value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub files: Vec<PathBuf>,
    /// Specify where to place the reports of each file
    #[clap(short = 'd', long = "output-dir", default_value = ".")]
    pub output_directory: PathBuf,
    /// A name declared twice in one scope replaces the first declaration instead of being an error
    #[clap(long)]
    pub allow_redeclaration: bool,
    /// Calls must name a function declared before the calling function
    #[clap(long)]
    pub check_call_targets: bool,
    /// Maximum number of files processed at once. Defaults to the number of CPUs
    #[clap(short = 'j', long)]
    pub jobs: Option<usize>,
}

impl Args {
    pub fn log_level_filter(&self) -> LevelFilter {
        self.logging.log_level_filter()
    }

    /// The parser options selected by flags
    pub fn parser_config(&self) -> ParserConfig {
        let redeclaration = if self.allow_redeclaration {
            RedeclarationPolicy::Overwrite
        } else {
            RedeclarationPolicy::Reject
        };
        ParserConfig::new()
            .redeclaration(redeclaration)
            .check_call_targets(self.check_call_targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn test_args_parsing() {
        let test = "rillc file.rill";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.files[0], Path::new("file.rill"));
        assert_eq!(args.output_directory, Path::new("."));
        assert_eq!(args.jobs, None);
        assert_eq!(args.parser_config(), ParserConfig::default());
        assert_eq!(args.log_level_filter(), LevelFilter::INFO);
    }

    #[test]
    fn test_flags() {
        let test = "rillc -vv -d out --allow-redeclaration --check-call-targets -j 3 src a.rill";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.files, [Path::new("src"), Path::new("a.rill")]);
        assert_eq!(args.output_directory, Path::new("out"));
        assert_eq!(args.jobs, Some(3));
        let config = args.parser_config();
        assert_eq!(config.redeclaration_policy(), RedeclarationPolicy::Overwrite);
        assert!(config.checks_call_targets());
        assert_eq!(args.log_level_filter(), LevelFilter::TRACE);
    }

    #[test]
    fn test_files_are_required() {
        assert!(Args::try_parse_from(["rillc", "-q"]).is_err());
    }
}
