//! Persisting what the front end produced

use itertools::Itertools;
use rill_ast_parsing::FrontendOutput;
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

mod ast_printer;

pub use ast_printer::AstPrinter;

/// Consumes the output of the front end for one source file
pub trait Reporter {
    fn report(&mut self, source: &Path, output: &FrontendOutput) -> io::Result<()>;
}

/// Writes plain text reports for each source into `<output directory>/<file stem>/`.
///
/// The files written are `tokens.txt`, `lexical_errors.txt`, `syntax_errors.txt`,
/// `symbol_tables.txt` and `ast.txt`. Every file is written even if it ends up empty.
#[derive(Debug, Clone)]
pub struct TextReporter {
    output_directory: PathBuf,
}

impl TextReporter {
    pub const TOKENS: &'static str = "tokens.txt";
    pub const LEXICAL_ERRORS: &'static str = "lexical_errors.txt";
    pub const SYNTAX_ERRORS: &'static str = "syntax_errors.txt";
    pub const SYMBOL_TABLES: &'static str = "symbol_tables.txt";
    pub const AST: &'static str = "ast.txt";

    pub fn new(output_directory: impl AsRef<Path>) -> Self {
        Self {
            output_directory: output_directory.as_ref().to_path_buf(),
        }
    }

    /// The directory the reports of a source file are written to
    pub fn report_directory(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "out".to_string());
        self.output_directory.join(stem)
    }
}

impl Reporter for TextReporter {
    fn report(&mut self, source: &Path, output: &FrontendOutput) -> io::Result<()> {
        let directory = self.report_directory(source);
        fs::create_dir_all(&directory)?;
        debug!("writing reports of {source:?} to {directory:?}");

        fs::write(directory.join(Self::TOKENS), lines(&output.tokens))?;
        fs::write(
            directory.join(Self::LEXICAL_ERRORS),
            lines(&output.lexical_errors),
        )?;
        fs::write(
            directory.join(Self::SYNTAX_ERRORS),
            lines(&output.diagnostics),
        )?;
        fs::write(directory.join(Self::SYMBOL_TABLES), symbol_tables(output))?;
        fs::write(
            directory.join(Self::AST),
            AstPrinter::print(&output.program),
        )?;
        Ok(())
    }
}

fn lines<T: Display>(items: &[T]) -> String {
    items.iter().map(|item| format!("{item}\n")).join("")
}

fn symbol_tables(output: &FrontendOutput) -> String {
    let mut text = format!("global:\n{}", indent(&output.globals));
    for (function, scope) in &output.symbol_tables {
        text.push_str(&format!("\n{function}:\n{}", indent(scope)));
    }
    text
}

fn indent(item: impl Display) -> String {
    item.to_string()
        .lines()
        .map(|line| format!("  {line}\n"))
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_ast_parsing::parse_source;
    use rill_ast_parsing::parser::ParserConfig;
    use tempfile::TempDir;

    fn read(directory: &Path, file: &str) -> String {
        fs::read_to_string(directory.join(file)).expect("report should exist")
    }

    #[test]
    fn test_reports_are_written() {
        let dir = TempDir::new().unwrap();
        let output = parse_source(
            "fn main() -> int { let a: int; a = 5; b = 1; return a; } ?",
            &ParserConfig::default(),
        );
        let mut reporter = TextReporter::new(dir.path());
        let source = Path::new("some/where/program.rill");
        reporter.report(source, &output).unwrap();

        let directory = dir.path().join("program");
        assert_eq!(reporter.report_directory(source), directory);
        let tokens = read(&directory, TextReporter::TOKENS);
        assert_eq!(tokens.lines().count(), output.tokens.len());
        assert_eq!(
            tokens.lines().next(),
            Some("Token(lexeme: 'fn', kind: FN, line: 1)")
        );
        assert_eq!(
            read(&directory, TextReporter::LEXICAL_ERRORS),
            "lexical error: unexpected character '?' at line 1\n"
        );
        assert_eq!(
            read(&directory, TextReporter::SYNTAX_ERRORS),
            "semantic error at line 1: undeclared identifier \"b\"\n"
        );
        assert_eq!(
            read(&directory, TextReporter::SYMBOL_TABLES),
            "global:\n  main: int function (line 1)\n\nmain:\n  a: int variable (line 1)\n"
        );
        assert!(read(&directory, TextReporter::AST).starts_with("FunctionDecl fn main() -> int"));
    }

    #[test]
    fn test_empty_reports_are_still_written() {
        let dir = TempDir::new().unwrap();
        let output = parse_source("", &ParserConfig::default());
        TextReporter::new(dir.path())
            .report(Path::new("empty.rill"), &output)
            .unwrap();
        let directory = dir.path().join("empty");
        for file in [
            TextReporter::TOKENS,
            TextReporter::LEXICAL_ERRORS,
            TextReporter::SYNTAX_ERRORS,
            TextReporter::AST,
        ] {
            assert_eq!(read(&directory, file), "", "{file} should be empty");
        }
        assert_eq!(read(&directory, TextReporter::SYMBOL_TABLES), "global:\n");
    }
}
