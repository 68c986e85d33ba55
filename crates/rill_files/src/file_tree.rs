use crate::FilesError;
use std::collections::{BTreeSet, HashSet};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Used for representing a hierarchy of files
pub trait FileTree {
    /// Every file in this tree, sorted
    fn flatten(&self) -> Result<BTreeSet<PathBuf>, FilesError>;

    fn union<F>(self, other: F) -> UnionFileTree
    where
        Self: Sized + 'static,
        F: FileTree + 'static,
    {
        let mut union = UnionFileTree::default();
        union.trees.push(Box::new(self));
        union.trees.push(Box::new(other));
        union
    }
}

/// The files under a root path.
///
/// A root that is itself a file is always part of the tree. Files found by walking a directory
/// root are only kept when they have the configured extension.
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
    extension: Option<String>,
}

impl SourceTree {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: None,
        }
    }

    /// Only keep walked files with this extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn accepts(&self, path: &Path) -> bool {
        match &self.extension {
            None => true,
            Some(extension) => path.extension() == Some(OsStr::new(extension)),
        }
    }
}

impl FileTree for SourceTree {
    fn flatten(&self) -> Result<BTreeSet<PathBuf>, FilesError> {
        if !self.root.exists() {
            return Err(FilesError::Missing(self.root.clone()));
        }
        if self.root.is_file() {
            return Ok(BTreeSet::from([self.root.clone()]));
        }

        let mut stack = vec![self.root.clone()];
        let mut visited = HashSet::new();
        let mut files = BTreeSet::new();

        while let Some(path) = stack.pop() {
            if !visited.insert(path.clone()) {
                continue;
            }
            if path.is_file() {
                if self.accepts(&path) {
                    trace!("found source {path:?}");
                    files.insert(path);
                }
            } else if path.is_dir() {
                let read_dir = std::fs::read_dir(&path).map_err(|source| FilesError::Io {
                    path: path.clone(),
                    source,
                })?;
                stack.extend(read_dir.filter_map(|entry| entry.ok()).map(|entry| entry.path()));
            }
        }

        Ok(files)
    }
}

/// Several file trees viewed as one
#[derive(Default)]
pub struct UnionFileTree {
    trees: Vec<Box<dyn FileTree>>,
}

impl<F: FileTree + 'static> FromIterator<F> for UnionFileTree {
    fn from_iter<T: IntoIterator<Item = F>>(iter: T) -> Self {
        Self {
            trees: iter
                .into_iter()
                .map(|f| Box::new(f) as Box<dyn FileTree>)
                .collect(),
        }
    }
}

impl FileTree for UnionFileTree {
    fn flatten(&self) -> Result<BTreeSet<PathBuf>, FilesError> {
        let mut files = BTreeSet::new();
        for tree in &self.trees {
            files.extend(tree.flatten()?);
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_union_of_trees() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join("a.rill"), "").unwrap();
        fs::write(first.path().join("a.txt"), "").unwrap();
        fs::write(second.path().join("b.txt"), "").unwrap();

        let union = SourceTree::new(first.path())
            .with_extension("rill")
            .union(SourceTree::new(second.path()));
        let files = union.flatten().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains(&first.path().join("a.rill")));
        assert!(files.contains(&second.path().join("b.txt")));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let tree = SourceTree::new(dir.path()).with_extension("rill");
        assert!(tree.flatten().unwrap().is_empty());
    }
}
