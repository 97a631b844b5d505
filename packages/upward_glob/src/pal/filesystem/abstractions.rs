// Filesystem trait abstraction for mocking in tests.
//
// Glob expansion is a single operation here rather than raw directory listing, so the search
// logic stays independent of how patterns are matched against directory contents.

use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, PatternError};

/// Abstraction over filesystem operations used by upward_glob.
///
/// This trait is automatically mocked by mockall in test builds, generating `MockFilesystem`.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Filesystem: Debug + Send + Sync + 'static {
    /// Returns the current working directory.
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Expands a glob pattern into the existing paths that match it, in sorted order.
    ///
    /// Entries that cannot be read during expansion are skipped.
    fn glob(&self, pattern: &str, options: MatchOptions) -> Result<Vec<PathBuf>, PatternError>;

    /// Returns `true` if the path is a directory, following symbolic links.
    ///
    /// Returns an error if the path does not exist (anymore) or cannot be queried.
    fn is_dir(&self, path: &Path) -> io::Result<bool>;
}
