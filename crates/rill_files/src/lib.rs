#![doc = include_str!("../README.md")]

mod file_tree;

pub use file_tree::{FileTree, SourceTree, UnionFileTree};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The extension of rill source files
pub const SOURCE_EXTENSION: &str = "rill";

/// Creates a file tree of the rill sources under a starting path
pub fn file_tree(src: &Path) -> SourceTree {
    SourceTree::new(src).with_extension(SOURCE_EXTENSION)
}

/// Collects the rill sources of every given path, sorted and without duplicates
pub fn source_files<P: AsRef<Path>>(
    roots: impl IntoIterator<Item = P>,
) -> Result<Vec<PathBuf>, FilesError> {
    let union = roots
        .into_iter()
        .map(|root| file_tree(root.as_ref()))
        .collect::<UnionFileTree>();
    Ok(union.flatten()?.into_iter().collect())
}

/// An error while collecting files
#[derive(Debug, Error)]
pub enum FilesError {
    #[error("{0:?} does not exist")]
    Missing(PathBuf),
    #[error("could not read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use test_log::test;

    fn sources() -> TempDir {
        let dir = TempDir::new().expect("could not create temp dir");
        fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
        fs::write(dir.path().join("main.rill"), "fn main() {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a source").unwrap();
        fs::write(dir.path().join("nested/util.rill"), "fn util() {}").unwrap();
        fs::write(dir.path().join("nested/deeper/more.rill"), "").unwrap();
        dir
    }

    #[test]
    fn test_directories_are_filtered_by_extension() {
        let dir = sources();
        let files = source_files([dir.path()]).unwrap();
        let relative = files
            .iter()
            .map(|path| path.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect::<Vec<_>>();
        assert_eq!(
            relative,
            [
                PathBuf::from("main.rill"),
                PathBuf::from("nested/deeper/more.rill"),
                PathBuf::from("nested/util.rill"),
            ]
        );
    }

    #[test]
    fn test_explicit_files_are_kept_once() {
        let dir = sources();
        let notes = dir.path().join("notes.txt");
        let main = dir.path().join("main.rill");
        let files = source_files([&notes, &main, &main]).unwrap();
        assert_eq!(files, [main, notes]);
    }

    #[test]
    fn test_missing_path() {
        let dir = sources();
        let missing = dir.path().join("missing.rill");
        let err = source_files([&missing]).unwrap_err();
        assert!(matches!(err, FilesError::Missing(path) if path == missing));
    }
}
