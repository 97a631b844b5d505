// Free-function entry points. Each one is a thin layer over `Search`.

use std::path::PathBuf;

use crate::{Result, Search, TargetKind};

/// Searches the current working directory and then its ancestors, up to the filesystem root, for
/// entries of the given kind that match any of the patterns.
///
/// Returns the matches from the nearest directory that has any.
///
/// # Errors
///
/// Returns [`Error::NotFound`][crate::Error::NotFound] if no directory contains a match, or
/// another error if a pattern is malformed or the working directory cannot be determined.
pub fn search<I>(kind: TargetKind, patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Search::new(kind).patterns(patterns).run()
}

/// Like [`search()`] but does not ascend above `boundary`, which is itself searched.
///
/// An empty `boundary` means no boundary. A relative `boundary` is resolved against the current
/// working directory.
///
/// # Errors
///
/// See [`search()`].
pub fn search_under<B, I>(kind: TargetKind, boundary: B, patterns: I) -> Result<Vec<PathBuf>>
where
    B: Into<PathBuf>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    Search::new(kind)
        .bounded_by(boundary)
        .patterns(patterns)
        .run()
}

/// Like [`search_under()`] but starts in `start` instead of the current working directory.
///
/// Relative paths are resolved against the current working directory.
///
/// # Errors
///
/// See [`search()`].
pub fn search_from_under<S, B, I>(
    kind: TargetKind,
    start: S,
    boundary: B,
    patterns: I,
) -> Result<Vec<PathBuf>>
where
    S: Into<PathBuf>,
    B: Into<PathBuf>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    Search::new(kind)
        .starting_at(start)
        .bounded_by(boundary)
        .patterns(patterns)
        .run()
}

/// Searches `start` and then its ancestors, up to and including `boundary`, for entries of the
/// given kind that match any of the patterns.
///
/// An empty `boundary` means no boundary, in which case the search may ascend to the filesystem
/// root. Relative `start` and `boundary` paths are resolved against `base`. The current working
/// directory is only consulted if `base` is itself relative.
///
/// # Errors
///
/// See [`search()`].
pub fn search_in<D, S, B, I>(
    base: D,
    kind: TargetKind,
    start: S,
    boundary: B,
    patterns: I,
) -> Result<Vec<PathBuf>>
where
    D: Into<PathBuf>,
    S: Into<PathBuf>,
    B: Into<PathBuf>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    Search::new(kind)
        .relative_to(base)
        .starting_at(start)
        .bounded_by(boundary)
        .patterns(patterns)
        .run()
}

/// Like [`search()`] but panics if the search fails, for callers that cannot continue without
/// a match (e.g. during startup).
///
/// # Panics
///
/// Panics if no match is found or the search cannot be performed.
#[must_use]
#[track_caller]
pub fn must_search<I>(kind: TargetKind, patterns: I) -> Vec<PathBuf>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Search::new(kind).patterns(patterns).must_run()
}

/// Like [`search_under()`] but panics if the search fails.
///
/// # Panics
///
/// Panics if no match is found or the search cannot be performed.
#[must_use]
#[track_caller]
pub fn must_search_under<B, I>(kind: TargetKind, boundary: B, patterns: I) -> Vec<PathBuf>
where
    B: Into<PathBuf>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    Search::new(kind)
        .bounded_by(boundary)
        .patterns(patterns)
        .must_run()
}

/// Like [`search_from_under()`] but panics if the search fails.
///
/// # Panics
///
/// Panics if no match is found or the search cannot be performed.
#[must_use]
#[track_caller]
pub fn must_search_from_under<S, B, I>(
    kind: TargetKind,
    start: S,
    boundary: B,
    patterns: I,
) -> Vec<PathBuf>
where
    S: Into<PathBuf>,
    B: Into<PathBuf>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    Search::new(kind)
        .starting_at(start)
        .bounded_by(boundary)
        .patterns(patterns)
        .must_run()
}
