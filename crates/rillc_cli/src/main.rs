use crate::args::Args;
use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout as StdoutStream;
use rill_files::source_files;
use rillc::{CompileSummary, RillC};
use std::io;
use std::io::{stderr, stdout, Stderr, StderrLock, Stdout, StdoutLock};
use std::process::ExitCode;
use tracing::metadata::LevelFilter;
use tracing::Metadata;
use tracing::{debug, trace, warn, Level};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::{format, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

mod args;

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.log_level_filter())?;
    trace!("starting rillc with args: {args:?}");
    debug!("rillc version: {}", env!("CARGO_PKG_VERSION"));

    let to_compile = source_files(&args.files)?;
    debug!("paths to compile: {to_compile:#?}");
    if to_compile.is_empty() {
        warn!("no rill sources found in {:?}", args.files);
    }

    std::fs::create_dir_all(&args.output_directory)?;
    let mut builder = RillC::builder()
        .output_directory(&args.output_directory)
        .parser_config(args.parser_config());
    if let Some(jobs) = args.jobs {
        builder = builder.jobs(jobs);
    }
    let mut rill_c = builder.build()?;
    let summary = rill_c.compile_all(to_compile).await?;

    print_summary(&summary);
    if summary.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_summary(summary: &CompileSummary) {
    for file in &summary.files {
        let status = if file.error_count() == 0 {
            format!("{}", "ok".if_supports_color(StdoutStream, |t| t.green()))
        } else {
            format!(
                "{}",
                format!("{} errors", file.error_count()).if_supports_color(StdoutStream, |t| t.red())
            )
        };
        println!(
            "{}: {} functions, {status}",
            file.path.display(),
            file.functions
        );
    }
    let total = format!(
        "checked {} files, {} errors",
        summary.files.len(),
        summary.error_count()
    );
    if summary.is_clean() {
        println!("{}", total.if_supports_color(StdoutStream, |t| t.green()));
    } else {
        println!("{}", total.if_supports_color(StdoutStream, |t| t.red()));
    }
}

struct MyWriter {
    stdout: Stdout,
    stderr: Stderr,
}

enum StdioLock<'a> {
    Stdout(StdoutLock<'a>),
    Stderr(StderrLock<'a>),
}

impl<'a> io::Write for StdioLock<'a> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write(buf),
            StdioLock::Stderr(stderr) => stderr.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.flush(),
            StdioLock::Stderr(stderr) => stderr.flush(),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write_all(buf),
            StdioLock::Stderr(stderr) => stderr.write_all(buf),
        }
    }
}

impl<'a> MakeWriter<'a> for MyWriter {
    type Writer = StdioLock<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        StdioLock::Stdout(self.stdout.lock())
    }

    /// warnings and errors go to stderr
    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if meta.level() <= &Level::WARN {
            StdioLock::Stderr(self.stderr.lock())
        } else {
            StdioLock::Stdout(self.stdout.lock())
        }
    }
}

fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format().with_thread_ids(true))
                .with_writer(MyWriter {
                    stdout: stdout(),
                    stderr: stderr(),
                })
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}
