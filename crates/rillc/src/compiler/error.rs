//! A rillc error

use itertools::Itertools as _;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::AcquireError;
use tokio::task::JoinError;

/// The kind of error
#[derive(Debug, Error)]
pub enum RillCErrorKind {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{}", .0.iter().join("\n"))]
    Multi(Vec<RillCError>),
    #[error(transparent)]
    Join(#[from] JoinError),
    #[error(transparent)]
    Acquire(#[from] AcquireError),
}

impl From<Vec<RillCError>> for RillCErrorKind {
    fn from(value: Vec<RillCError>) -> Self {
        RillCErrorKind::Multi(value)
    }
}

/// An error occurred while running the front end over rill files
#[derive(Debug, Error)]
pub struct RillCError {
    kind: RillCErrorKind,
    path: Option<PathBuf>,
}

impl RillCError {
    /// Creates a new [RillCError] using a quick constructor
    #[inline]
    pub fn new(error: impl Into<RillCErrorKind>, path: impl Into<Option<PathBuf>>) -> Self {
        Self {
            kind: error.into(),
            path: path.into(),
        }
    }

    pub fn kind(&self) -> &RillCErrorKind {
        &self.kind
    }

    /// The source file this error happened for, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Display for RillCError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path.display(), self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl From<RillCErrorKind> for RillCError {
    fn from(value: RillCErrorKind) -> Self {
        Self::new(value, None)
    }
}

impl From<io::Error> for RillCError {
    fn from(value: io::Error) -> Self {
        Self::new(value, None)
    }
}

impl From<JoinError> for RillCError {
    fn from(value: JoinError) -> Self {
        Self::new(value, None)
    }
}

impl From<Vec<RillCError>> for RillCError {
    fn from(value: Vec<RillCError>) -> Self {
        Self::new(value, None)
    }
}

/// A type alias for general results in rillc
pub type RillCResult<T> = Result<T, RillCError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_display() {
        let error = RillCError::from(vec![
            RillCError::new(
                io::Error::new(io::ErrorKind::NotFound, "gone"),
                PathBuf::from("a.rill"),
            ),
            RillCError::new(io::Error::new(io::ErrorKind::Other, "broken"), None),
        ]);
        assert_eq!(error.to_string(), "a.rill: gone\nbroken");
        assert!(matches!(error.kind(), RillCErrorKind::Multi(errors) if errors.len() == 2));
    }
}
