use std::path::{Path, PathBuf};

use glob::MatchOptions;

use crate::pal::{Filesystem, FilesystemFacade};
use crate::{Error, Result, TargetKind, ascent, paths};

/// Describes and runs a search for glob matches in a directory or its nearest ancestor.
///
/// The default search starts in the current working directory, has no boundary (it may ascend all
/// the way to the filesystem root), has no patterns and matches case-sensitively, with wildcards
/// also matching names that start with a `.`.
///
/// Relative start and boundary paths are resolved against the base directory, which is the
/// current working directory unless set via [`relative_to()`][Self::relative_to]. The working
/// directory is only queried if some path actually needs it.
///
/// # Example
///
/// ```
/// use std::fs;
///
/// use upward_glob::{Search, TargetKind};
///
/// let root = tempfile::tempdir().unwrap();
/// fs::create_dir_all(root.path().join("crates/app/src")).unwrap();
/// fs::write(root.path().join("Cargo.lock"), "").unwrap();
///
/// let lock_files = Search::new(TargetKind::File)
///     .relative_to(root.path())
///     .starting_at("crates/app/src")
///     .bounded_by(".")
///     .pattern("*.lock")
///     .run()
///     .unwrap();
///
/// assert_eq!(lock_files, vec![root.path().join("Cargo.lock")]);
/// ```
#[derive(Clone, Debug)]
pub struct Search {
    kind: TargetKind,
    base: Option<PathBuf>,
    start: Option<PathBuf>,
    boundary: Option<PathBuf>,
    patterns: Vec<String>,
    match_options: MatchOptions,

    fs: FilesystemFacade,
}

impl Search {
    /// Creates a search for entries of the given kind, with the default configuration.
    #[must_use]
    pub fn new(kind: TargetKind) -> Self {
        Self::with_filesystem(kind, FilesystemFacade::target())
    }

    #[must_use]
    pub(crate) fn with_filesystem(kind: TargetKind, fs: FilesystemFacade) -> Self {
        Self {
            kind,
            base: None,
            start: None,
            boundary: None,
            patterns: Vec::new(),
            match_options: MatchOptions::new(),
            fs,
        }
    }

    /// Sets the directory the search starts in. The start directory itself is searched first.
    ///
    /// Defaults to the base directory.
    #[must_use]
    pub fn starting_at(mut self, start: impl Into<PathBuf>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Sets the outermost directory the search may ascend to. The boundary directory is itself
    /// searched before the search gives up.
    ///
    /// An empty path removes the boundary. A boundary that is not an ancestor of the start
    /// directory is never reached, so such a search ascends to the filesystem root.
    #[must_use]
    pub fn bounded_by(mut self, boundary: impl Into<PathBuf>) -> Self {
        let boundary = boundary.into();
        self.boundary = (!paths::is_empty(&boundary)).then_some(boundary);
        self
    }

    /// Sets the directory that relative start and boundary paths are resolved against, instead
    /// of the current working directory.
    #[must_use]
    pub fn relative_to(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Adds a glob pattern, matched relative to each directory visited.
    ///
    /// Patterns are expanded in the order they are added and their matches are concatenated.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Adds several glob patterns. See [`pattern()`][Self::pattern].
    #[must_use]
    pub fn patterns<I>(mut self, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Matches patterns without regard to ASCII case.
    #[must_use]
    pub fn case_insensitive(mut self) -> Self {
        self.match_options.case_sensitive = false;
        self
    }

    /// Requires a leading `.` in a name to be matched by a literal `.` in the pattern, so that
    /// `*` does not match hidden entries.
    #[must_use]
    pub fn require_literal_leading_dot(mut self) -> Self {
        self.match_options.require_literal_leading_dot = true;
        self
    }

    /// Runs the search, returning the absolute paths of all accepted matches in the nearest
    /// directory that has any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no directory up to the boundary (or the filesystem root)
    /// contains a match. Returns other errors if a pattern is malformed or a relative path cannot
    /// be resolved; no directories are searched in that case.
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        let start = self.absolutize(self.start.as_deref().unwrap_or_else(|| Path::new(".")))?;

        let boundary = self
            .boundary
            .as_deref()
            .map(|boundary| self.absolutize(boundary))
            .transpose()?;

        ascent::ascend(
            self.kind,
            &start,
            boundary.as_deref(),
            &self.patterns,
            self.match_options,
            &self.fs,
        )
    }

    /// Runs the search, panicking if it fails for any reason, including finding no match.
    ///
    /// # Panics
    ///
    /// Panics if [`run()`][Self::run] returns an error.
    #[must_use]
    #[track_caller]
    pub fn must_run(&self) -> Vec<PathBuf> {
        self.run()
            .unwrap_or_else(|error| panic!("upward glob search failed: {error}"))
    }

    fn absolutize(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            return Ok(paths::normalize(path));
        }

        Ok(paths::absolutize(&self.base_dir(path)?, path))
    }

    fn base_dir(&self, resolving: &Path) -> Result<PathBuf> {
        let working_dir = || {
            self.fs
                .current_dir()
                .map_err(|source| Error::PathResolution {
                    path: resolving.to_path_buf(),
                    source,
                })
        };

        match &self.base {
            Some(base) if base.is_absolute() => Ok(base.clone()),
            Some(base) => Ok(working_dir()?.join(base)),
            None => working_dir(),
        }
    }
}
