// Lexical path normalization.
//
// Directory identity during ascent is decided by comparing normalized paths, so start and
// boundary must go through the same normalization. We never touch the filesystem here: symlinks
// are not resolved and the paths do not need to exist.

use std::path::{Component, Path, PathBuf};

/// Resolves `path` against `base` (if relative) and normalizes the result lexically.
pub(crate) fn absolutize(base: &Path, path: &Path) -> PathBuf {
    // `join` replaces the base entirely if `path` is already absolute.
    normalize(&base.join(path))
}

/// Removes `.` components and resolves `..` against the preceding component.
///
/// A `..` directly under the root is dropped, as the parent of the root is the root itself.
/// A leading `..` in a relative path is preserved. An empty result is returned as `.`.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::Prefix(_) | Component::RootDir) => {}
                Some(Component::ParentDir | Component::CurDir) | None => {
                    normalized.push(component);
                }
            },
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(Component::CurDir);
    }

    normalized
}

/// Whether the path is empty, which callers use to mean "no boundary".
pub(crate) fn is_empty(path: &Path) -> bool {
    path.as_os_str().is_empty()
}
