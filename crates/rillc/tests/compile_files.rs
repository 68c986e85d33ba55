use rill_ast_parsing::parser::{ParserConfig, RedeclarationPolicy};
use rillc::report::TextReporter;
use rillc::{RillC, RillCErrorKind};
use std::fs;
use tracing::info;

mod common;

static CLEAN: &str = r#"
fn main() -> int {
    let a: int;
    a = 5;
    println("%d", a);
    return a;
}
"#;

static BROKEN: &str = r#"
fn first() {
    let x: int
    x = 1;
}
fn second() { let x: int; let x: char; }
"#;

#[test_log::test(tokio::test)]
async fn test_compile_single_file() -> eyre::Result<()> {
    let dir = common::target_dir();
    let output_dir = dir.path().join("out");
    fs::create_dir(&output_dir)?;
    info!("compiling to {output_dir:?}");
    let mut rill_c = RillC::builder()
        .output_directory(&output_dir)
        .build()
        .expect("could not create rillc");

    let file = common::source(dir.path(), "clean.rill", CLEAN);
    let summary = rill_c.compile(&file).await?;
    assert_eq!(summary.functions, 1);
    assert_eq!(summary.error_count(), 0);

    let reports = output_dir.join("clean");
    for report in [
        TextReporter::TOKENS,
        TextReporter::LEXICAL_ERRORS,
        TextReporter::SYNTAX_ERRORS,
        TextReporter::SYMBOL_TABLES,
        TextReporter::AST,
    ] {
        assert!(reports.join(report).is_file(), "{report} was not written");
    }
    assert_eq!(
        fs::read_to_string(reports.join(TextReporter::SYMBOL_TABLES))?,
        "global:\n  main: int function (line 2)\n\nmain:\n  a: int variable (line 3)\n"
    );
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_compile_all_collects_diagnostics() -> eyre::Result<()> {
    let dir = common::target_dir();
    let files = vec![
        common::source(dir.path(), "clean.rill", CLEAN),
        common::source(dir.path(), "broken.rill", BROKEN),
    ];
    let mut rill_c = RillC::builder()
        .output_directory(dir.path())
        .jobs(1)
        .build()?;
    let summary = rill_c.compile_all(files).await?;

    assert_eq!(summary.files.len(), 2);
    assert_eq!(summary.files[0].path.file_name().unwrap(), "broken.rill");
    assert_eq!(summary.files[0].diagnostics, 2);
    assert_eq!(summary.files[0].functions, 2);
    assert_eq!(summary.files[1].error_count(), 0);
    assert!(!summary.is_clean());

    let errors = fs::read_to_string(dir.path().join("broken").join(TextReporter::SYNTAX_ERRORS))?;
    assert_eq!(errors.lines().count(), 2, "{errors}");
    assert!(errors.lines().next().unwrap().starts_with("syntax error at line 4"));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_parser_config_is_used() -> eyre::Result<()> {
    let dir = common::target_dir();
    let file = common::source(dir.path(), "broken.rill", BROKEN);
    let mut rill_c = RillC::builder()
        .output_directory(dir.path())
        .parser_config(ParserConfig::new().redeclaration(RedeclarationPolicy::Overwrite))
        .build()?;
    let summary = rill_c.compile(&file).await?;
    assert_eq!(summary.diagnostics, 1);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_missing_files_are_all_reported() -> eyre::Result<()> {
    let dir = common::target_dir();
    let mut rill_c = RillC::builder().output_directory(dir.path()).build()?;
    let error = rill_c
        .compile_all(vec![
            dir.path().join("missing.rill"),
            common::source(dir.path(), "clean.rill", CLEAN),
            dir.path().join("also_missing.rill"),
        ])
        .await
        .expect_err("missing files should fail");
    let RillCErrorKind::Multi(errors) = error.kind() else {
        panic!("expected multiple errors, got {error}");
    };
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.path().is_some()));
    assert!(dir.path().join("clean").is_dir());
    Ok(())
}
