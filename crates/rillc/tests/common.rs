use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A fresh directory for sources and reports that is removed once dropped
pub fn target_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("rillc-test-")
        .tempdir()
        .expect("could not create directory")
}

/// Writes a source file into a directory, returning its path
pub fn source(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("could not write source");
    path
}
