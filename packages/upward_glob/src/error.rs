use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur when searching ancestor directories.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// No pattern matched an entry of the requested kind in any directory from the start
    /// directory up to and including the boundary directory (or the filesystem root).
    ///
    /// This is the expected outcome of a search that finds nothing. Use
    /// [`is_not_found()`][Error::is_not_found] to tell it apart from other failures.
    #[error(
        "no match found searching upward from '{}'{}",
        .start.display(),
        describe_boundary(.boundary.as_deref())
    )]
    NotFound {
        /// The normalized absolute directory the search started from.
        start: PathBuf,

        /// The normalized absolute boundary directory, if the search was bounded.
        boundary: Option<PathBuf>,
    },

    /// A relative path could not be made absolute because the current working directory
    /// could not be determined.
    #[error("cannot resolve '{}' to an absolute path: {source}", .path.display())]
    PathResolution {
        /// The relative path that was being resolved.
        path: PathBuf,

        /// The underlying operating system error.
        source: io::Error,
    },

    /// A glob pattern was malformed.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as supplied by the caller.
        pattern: String,

        /// Details of the syntax problem.
        source: glob::PatternError,
    },

    /// A string did not name a [`TargetKind`][crate::TargetKind].
    #[error("invalid target kind: '{value}'. Valid options are: file, dir, any")]
    InvalidTargetKind {
        /// The string that failed to parse.
        value: String,
    },
}

impl Error {
    /// Whether this error means that the search completed without finding a match.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn describe_boundary(boundary: Option<&Path>) -> String {
    boundary.map_or_else(String::new, |boundary| {
        format!(" to boundary '{}'", boundary.display())
    })
}

/// A specialized `Result` type for search operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
