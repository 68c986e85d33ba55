//! Responsible with running the rill front end over source files

use crate::report::{Reporter, TextReporter};
use rill_ast_parsing::parse_source;
use rill_ast_parsing::parser::ParserConfig;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error_span, info, warn, Instrument, Span};

pub mod error;

pub use error::{RillCError, RillCErrorKind, RillCResult};

/// Runs the rill front end over rill files, reporting the results of each.
///
/// Must be configured using an [RillCBuilder].
#[derive(Debug)]
pub struct RillC {
    max_jobs: usize,
    output_directory: PathBuf,
    config: ParserConfig,
}

impl RillC {
    /// Creates the default RillCBuilder
    #[inline]
    pub fn builder() -> RillCBuilder {
        RillCBuilder::new()
    }

    /// Where reports are written
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn parser_config(&self) -> &ParserConfig {
        &self.config
    }

    /// Compile a file at a given path
    #[inline]
    pub async fn compile(&mut self, path: &Path) -> RillCResult<FileSummary> {
        compile_file(
            path.to_path_buf(),
            self.output_directory.clone(),
            self.config,
        )
        .instrument(error_span!("parse", path=?path))
        .await
    }

    /// Compiles every file, running at most the configured number of jobs at once.
    ///
    /// A file with diagnostics still counts as compiled. Only failing to read a file or to
    /// write its reports is an error, and all such errors are returned together.
    pub async fn compile_all(&mut self, paths: Vec<PathBuf>) -> RillCResult<CompileSummary> {
        let semaphore = Arc::new(Semaphore::new(self.max_jobs));
        let mut join_set = JoinSet::new();
        for path in paths {
            let semaphore = semaphore.clone();
            let output_directory = self.output_directory.clone();
            let config = self.config;
            let span = error_span!("parse", path=?path);
            join_set.spawn(
                async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| RillCError::new(e, path.clone()))?;
                    compile_file(path, output_directory, config).await
                }
                .instrument(span),
            );
        }

        let mut files = vec![];
        let mut errors = vec![];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(Ok(summary)) => files.push(summary),
                Ok(Err(error)) => errors.push(error),
                Err(error) => errors.push(RillCError::from(error)),
            }
        }

        match errors.len() {
            0 => {}
            1 => return Err(errors.remove(0)),
            _ => return Err(errors.into()),
        }
        files.sort_by(|left, right| left.path.cmp(&right.path));
        Ok(CompileSummary { files })
    }
}

async fn compile_file(
    path: PathBuf,
    output_directory: PathBuf,
    config: ParserConfig,
) -> RillCResult<FileSummary> {
    let src = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| RillCError::new(e, path.clone()))?;
    let span = Span::current();
    tokio::task::spawn_blocking(move || -> RillCResult<FileSummary> {
        let _entered = span.enter();
        let output = parse_source(&src, &config);
        for error in &output.lexical_errors {
            warn!("{error}");
        }
        for error in &output.diagnostics {
            warn!("{error}");
        }
        TextReporter::new(&output_directory)
            .report(&path, &output)
            .map_err(|e| RillCError::new(e, path.clone()))?;
        let summary = FileSummary {
            functions: output.functions.len(),
            lexical_errors: output.lexical_errors.len(),
            diagnostics: output.diagnostics.len(),
            path,
        };
        info!(
            "{} functions, {} errors",
            summary.functions,
            summary.error_count()
        );
        Ok(summary)
    })
    .await?
}

/// What the front end found in one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub path: PathBuf,
    /// Functions that parsed without errors
    pub functions: usize,
    pub lexical_errors: usize,
    /// Syntactic and semantic errors
    pub diagnostics: usize,
}

impl FileSummary {
    pub fn error_count(&self) -> usize {
        self.lexical_errors + self.diagnostics
    }
}

/// What the front end found in every file, sorted by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileSummary {
    pub files: Vec<FileSummary>,
}

impl CompileSummary {
    pub fn error_count(&self) -> usize {
        self.files.iter().map(FileSummary::error_count).sum()
    }

    /// Whether no file had any error
    pub fn is_clean(&self) -> bool {
        self.error_count() == 0
    }
}

/// Builder for creating a [RillC] instance.
#[derive(Debug)]
pub struct RillCBuilder {
    /// Number of jobs to run at once
    pub jobs: usize,
    pub output_directory: PathBuf,
    pub config: ParserConfig,
}

impl RillCBuilder {
    /// Creates an RillCBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output directory for reports
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = path.as_ref().to_path_buf();
        self
    }

    /// Sets the maximum number of files processed at once
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn parser_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds an [RillC] instance from this builder
    pub fn build(self) -> Result<RillC, BuildRillCError> {
        if self.jobs == 0 {
            return Err(BuildRillCError::ZeroJobs);
        }

        let output_dir_meta = std::fs::metadata(&self.output_directory).map_err(|e| {
            BuildRillCError::OutputDirectoryDoesNotExist(self.output_directory.clone(), e)
        })?;
        if !output_dir_meta.is_dir() {
            return Err(BuildRillCError::OutputDirectoryIsNotADirectory(
                self.output_directory,
            ));
        }
        debug!(
            "rillc configured with {} jobs, writing to {:?}",
            self.jobs, self.output_directory
        );
        Ok(RillC {
            max_jobs: self.jobs,
            output_directory: self.output_directory,
            config: self.config,
        })
    }
}

impl Default for RillCBuilder {
    fn default() -> Self {
        Self {
            jobs: num_cpus::get(),
            output_directory: PathBuf::from("."),
            config: ParserConfig::default(),
        }
    }
}

/// An error occurred while building an [RillC] instance
#[derive(Debug, Error)]
pub enum BuildRillCError {
    #[error("{0:?} does not exist: {1}")]
    OutputDirectoryDoesNotExist(PathBuf, io::Error),
    #[error("{0:?} is not a directory")]
    OutputDirectoryIsNotADirectory(PathBuf),
    #[error("Compilation can't occur if no jobs are allowed")]
    ZeroJobs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_rejects_zero_jobs() {
        let dir = TempDir::new().unwrap();
        let result = RillC::builder().output_directory(dir.path()).jobs(0).build();
        assert!(matches!(result, Err(BuildRillCError::ZeroJobs)));
    }

    #[test]
    fn test_build_rejects_missing_output_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let result = RillC::builder().output_directory(&missing).build();
        assert!(matches!(
            result,
            Err(BuildRillCError::OutputDirectoryDoesNotExist(path, _)) if path == missing
        ));
    }

    #[test]
    fn test_build_rejects_file_as_output_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "").unwrap();
        let result = RillC::builder().output_directory(&file).build();
        assert!(matches!(
            result,
            Err(BuildRillCError::OutputDirectoryIsNotADirectory(_))
        ));
    }

    #[test]
    fn test_default_jobs() {
        assert_eq!(RillCBuilder::default().jobs, num_cpus::get());
    }
}
