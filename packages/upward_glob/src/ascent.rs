// The ascending matcher.
//
// Expands every pattern in one directory, and only if nothing of the requested kind matched
// there, moves on to the parent. The first directory with any accepted match wins outright.

use std::path::{self, MAIN_SEPARATOR, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, trace, warn};

use crate::pal::Filesystem;
use crate::{Error, Result, TargetKind};

/// Searches `start` and then each of its ancestors for entries matching any of `patterns`.
///
/// Both `start` and `boundary` must already be absolute and normalized, as directory identity is
/// decided by exact path equality. The boundary directory is itself searched before giving up.
pub(crate) fn ascend(
    kind: TargetKind,
    start: &Path,
    boundary: Option<&Path>,
    patterns: &[String],
    options: MatchOptions,
    fs: &impl Filesystem,
) -> Result<Vec<PathBuf>> {
    validate_patterns(patterns)?;

    debug!(
        %kind,
        start = %start.display(),
        boundary = ?boundary,
        pattern_count = patterns.len(),
        "searching upward"
    );

    for directory in start.ancestors() {
        let matches = matches_in_directory(directory, kind, patterns, options, fs)?;

        if !matches.is_empty() {
            debug!(
                directory = %directory.display(),
                match_count = matches.len(),
                "found matches"
            );
            return Ok(matches);
        }

        if boundary == Some(directory) {
            trace!(directory = %directory.display(), "reached boundary");
            break;
        }
    }

    debug!(start = %start.display(), "no match found");

    Err(Error::NotFound {
        start: start.to_path_buf(),
        boundary: boundary.map(Path::to_path_buf),
    })
}

/// Rejects malformed patterns before any directory is visited.
fn validate_patterns(patterns: &[String]) -> Result<()> {
    for pattern in patterns {
        Pattern::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
    }

    Ok(())
}

/// Collects the accepted matches of all patterns in a single directory, in pattern order.
fn matches_in_directory(
    directory: &Path,
    kind: TargetKind,
    patterns: &[String],
    options: MatchOptions,
    fs: &impl Filesystem,
) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();

    if patterns.is_empty() {
        return Ok(matches);
    }

    trace!(directory = %directory.display(), "searching directory");

    for pattern in patterns {
        let Some(full_pattern) = join_pattern(directory, pattern) else {
            // The glob crate only accepts patterns that are valid Unicode.
            warn!(
                directory = %directory.display(),
                %pattern,
                "directory is not valid Unicode, skipping pattern"
            );
            continue;
        };

        let entries = fs
            .glob(&full_pattern, options)
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;

        trace!(
            pattern = %full_pattern,
            entry_count = entries.len(),
            "expanded pattern"
        );

        matches.extend(
            entries
                .into_iter()
                .filter(|entry| is_accepted(kind, entry, fs)),
        );
    }

    Ok(matches)
}

fn is_accepted(kind: TargetKind, entry: &Path, fs: &impl Filesystem) -> bool {
    if !kind.needs_status() {
        return true;
    }

    match fs.is_dir(entry) {
        Ok(is_directory) => kind.accepts_directory(is_directory),
        Err(error) => {
            // The entry existed when the pattern was expanded. It is gone (or inaccessible) now,
            // which we treat the same as it never having matched.
            warn!(
                path = %entry.display(),
                %error,
                "matched entry could not be queried, skipping it"
            );
            false
        }
    }
}

/// Joins a pattern onto a directory, producing a glob that matches relative to that directory.
///
/// The pattern is cleaned lexically first: empty and `.` segments are dropped, so leading and
/// trailing separators have no effect, and each `..` removes the segment before it (or, when
/// there is none, moves to the parent of the directory). An empty pattern refers to the directory
/// itself. The directory part is escaped so that it only ever matches itself.
///
/// Returns `None` if the directory is not valid Unicode.
fn join_pattern(directory: &Path, pattern: &str) -> Option<String> {
    let mut directory = directory;
    let mut segments: Vec<&str> = Vec::new();

    for segment in pattern.split(path::is_separator) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    directory = directory.parent().unwrap_or(directory);
                }
            }
            _ => segments.push(segment),
        }
    }

    let mut joined = Pattern::escape(directory.to_str()?);

    for segment in segments {
        if !joined.ends_with(path::is_separator) {
            joined.push(MAIN_SEPARATOR);
        }

        joined.push_str(segment);
    }

    Some(joined)
}

#[cfg(all(test, unix))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::io;

    use super::*;
    use crate::pal::MockFilesystem;

    /// An in-memory tree of absolute paths, each flagged as directory or not.
    ///
    /// Parent directories are not implied; list every entry that should be visible.
    fn mock_tree(entries: &'static [(&'static str, bool)]) -> MockFilesystem {
        let mut mock = MockFilesystem::new();

        mock.expect_glob().returning(move |pattern, options| {
            let pattern = Pattern::new(pattern)?;
            let options = MatchOptions {
                require_literal_separator: true,
                ..options
            };

            let mut matches: Vec<PathBuf> = entries
                .iter()
                .filter(|(path, _)| pattern.matches_with(path, options))
                .map(|(path, _)| PathBuf::from(path))
                .collect();
            matches.sort();

            Ok(matches)
        });

        mock.expect_is_dir().returning(move |path| {
            entries
                .iter()
                .find(|(candidate, _)| Path::new(candidate) == path)
                .map(|(_, is_directory)| *is_directory)
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        });

        mock
    }

    const TREE: &[(&str, bool)] = &[
        ("/root", true),
        ("/root/target1.txt", false),
        ("/root/target2.txt", false),
        ("/root/submatch.txt", false),
        ("/root/target", true),
        ("/root/target/target1.txt", false),
        ("/root/target/target2.txt", false),
        ("/root/sub1", true),
        ("/root/sub1/sub2", true),
        ("/root/sub1/sub2/submatch.txt", false),
        ("/root/sub1/sub2/sub3", true),
    ];

    fn patterns(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(ToString::to_string).collect()
    }

    fn run(
        fs: &MockFilesystem,
        kind: TargetKind,
        start: &str,
        boundary: Option<&str>,
        pattern_list: &[&str],
    ) -> Result<Vec<PathBuf>> {
        ascend(
            kind,
            Path::new(start),
            boundary.map(Path::new),
            &patterns(pattern_list),
            MatchOptions::new(),
            fs,
        )
    }

    fn paths(paths: &[&str]) -> Vec<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn match_in_start_directory() {
        let fs = mock_tree(TREE);

        let result = run(&fs, TargetKind::Any, "/root", None, &["target1.txt"]).unwrap();
        assert_eq!(result, paths(&["/root/target1.txt"]));
    }

    #[test]
    fn file_kind_rejects_directories() {
        let fs = mock_tree(TREE);

        let result = run(&fs, TargetKind::File, "/root", None, &["target"]);
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn directory_kind_rejects_files() {
        let fs = mock_tree(TREE);

        let result = run(&fs, TargetKind::Directory, "/root", None, &["target"]).unwrap();
        assert_eq!(result, paths(&["/root/target"]));

        let result = run(&fs, TargetKind::Directory, "/root", None, &["target1.txt"]);
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn any_kind_accepts_both() {
        let fs = mock_tree(TREE);

        let result = run(&fs, TargetKind::Any, "/root", None, &["target*"]).unwrap();
        assert_eq!(
            result,
            paths(&["/root/target", "/root/target1.txt", "/root/target2.txt"])
        );
    }

    #[test]
    fn multiple_patterns_in_pattern_order() {
        let fs = mock_tree(TREE);

        let result = run(
            &fs,
            TargetKind::File,
            "/root",
            None,
            &["target2.txt", "target1.txt"],
        )
        .unwrap();
        assert_eq!(result, paths(&["/root/target2.txt", "/root/target1.txt"]));
    }

    #[test]
    fn glob_order_within_pattern() {
        let fs = mock_tree(TREE);

        let result = run(&fs, TargetKind::File, "/root", None, &["*.txt"]).unwrap();
        assert_eq!(
            result,
            paths(&[
                "/root/submatch.txt",
                "/root/target1.txt",
                "/root/target2.txt"
            ])
        );
    }

    #[test]
    fn ascends_to_nearest_ancestor_with_match() {
        let fs = mock_tree(TREE);

        let result = run(
            &fs,
            TargetKind::File,
            "/root/sub1/sub2/sub3",
            None,
            &["target*.txt"],
        )
        .unwrap();
        assert_eq!(result, paths(&["/root/target1.txt", "/root/target2.txt"]));
    }

    #[test]
    fn nearer_match_shadows_farther_match() {
        let fs = mock_tree(TREE);

        let result = run(&fs, TargetKind::File, "/root/sub1/sub2/sub3", None, &["*.txt"]).unwrap();
        assert_eq!(result, paths(&["/root/sub1/sub2/submatch.txt"]));
    }

    #[test]
    fn pattern_with_subdirectory_matches_in_ancestor() {
        let fs = mock_tree(TREE);

        let result = run(
            &fs,
            TargetKind::File,
            "/root/sub1/sub2",
            None,
            &["target/*.txt"],
        )
        .unwrap();
        assert_eq!(
            result,
            paths(&["/root/target/target1.txt", "/root/target/target2.txt"])
        );
    }

    #[test]
    fn boundary_is_inclusive() {
        let fs = mock_tree(TREE);

        let result = run(
            &fs,
            TargetKind::File,
            "/root/sub1/sub2/sub3",
            Some("/root/sub1/sub2"),
            &["*.txt"],
        )
        .unwrap();
        assert_eq!(result, paths(&["/root/sub1/sub2/submatch.txt"]));
    }

    #[test]
    fn boundary_stops_ascent() {
        let fs = mock_tree(TREE);

        let error = run(
            &fs,
            TargetKind::File,
            "/root/sub1/sub2/sub3",
            Some("/root/sub1/sub2"),
            &["target*.txt"],
        )
        .unwrap_err();

        match error {
            Error::NotFound { start, boundary } => {
                assert_eq!(start, PathBuf::from("/root/sub1/sub2/sub3"));
                assert_eq!(boundary, Some(PathBuf::from("/root/sub1/sub2")));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn boundary_equal_to_start_searches_only_start() {
        let fs = mock_tree(TREE);

        let result = run(
            &fs,
            TargetKind::File,
            "/root/sub1",
            Some("/root/sub1"),
            &["target*.txt"],
        );
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn boundary_outside_ancestry_falls_back_to_root() {
        let fs = mock_tree(TREE);

        let result = run(
            &fs,
            TargetKind::File,
            "/root/sub1/sub2/sub3",
            Some("/elsewhere"),
            &["target*.txt"],
        )
        .unwrap();
        assert_eq!(result, paths(&["/root/target1.txt", "/root/target2.txt"]));

        let result = run(
            &fs,
            TargetKind::File,
            "/root/sub1",
            Some("/elsewhere"),
            &["missing.txt"],
        );
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn no_match_up_to_root_is_not_found() {
        let fs = mock_tree(TREE);

        let error = run(&fs, TargetKind::Any, "/root/sub1", None, &["nothing*"]).unwrap_err();
        assert!(matches!(error, Error::NotFound { boundary: None, .. }));
    }

    #[test]
    fn zero_patterns_never_match() {
        let mut mock = MockFilesystem::new();
        mock.expect_glob().never();
        mock.expect_is_dir().never();

        let result = run(&mock, TargetKind::Any, "/root/sub1", None, &[]);
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn vanished_entry_is_skipped() {
        let mut mock = MockFilesystem::new();

        mock.expect_glob().returning(|pattern, _| {
            Ok(match pattern {
                "/root/sub1/*.lock" => vec![PathBuf::from("/root/sub1/gone.lock")],
                "/root/*.lock" => vec![PathBuf::from("/root/present.lock")],
                _ => Vec::new(),
            })
        });

        mock.expect_is_dir().returning(|path| {
            if path == Path::new("/root/present.lock") {
                Ok(false)
            } else {
                Err(io::Error::from(io::ErrorKind::NotFound))
            }
        });

        let result = run(&mock, TargetKind::File, "/root/sub1", None, &["*.lock"]).unwrap();
        assert_eq!(result, paths(&["/root/present.lock"]));
    }

    #[test]
    fn any_kind_makes_no_status_queries() {
        let mut mock = MockFilesystem::new();

        mock.expect_glob()
            .returning(|_, _| Ok(vec![PathBuf::from("/root/x.txt")]));
        mock.expect_is_dir().never();

        let result = run(&mock, TargetKind::Any, "/root", None, &["*.txt"]).unwrap();
        assert_eq!(result, paths(&["/root/x.txt"]));
    }

    #[test]
    fn invalid_pattern_aborts_before_listing() {
        let mut mock = MockFilesystem::new();
        mock.expect_glob().never();

        let error = run(&mock, TargetKind::Any, "/root", None, &["ok", "[broken"]).unwrap_err();
        assert!(matches!(error, Error::InvalidPattern { ref pattern, .. } if pattern == "[broken"));
    }

    #[test]
    fn directory_metacharacters_are_escaped() {
        let mut mock = MockFilesystem::new();

        mock.expect_glob()
            .withf(|pattern, _| pattern == "/root/[[]draft[]]/*.md")
            .times(1)
            .returning(|_, _| Ok(vec![PathBuf::from("/root/[draft]/notes.md")]));

        let result = run(&mock, TargetKind::Any, "/root/[draft]", None, &["*.md"]).unwrap();
        assert_eq!(result, paths(&["/root/[draft]/notes.md"]));
    }

    #[test]
    fn each_level_is_visited_once_until_boundary() {
        let mut mock = MockFilesystem::new();

        for directory in ["/a/b/c", "/a/b"] {
            let expected = format!("{directory}/*.toml");
            mock.expect_glob()
                .withf(move |pattern, _| pattern == expected)
                .times(1)
                .returning(|_, _| Ok(Vec::new()));
        }

        let result = run(&mock, TargetKind::Any, "/a/b/c", Some("/a/b"), &["*.toml"]);
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn join_pattern_handles_separators() {
        let join = |directory: &str, pattern: &str| join_pattern(Path::new(directory), pattern);

        assert_eq!(join("/a", "b*").as_deref(), Some("/a/b*"));
        assert_eq!(join("/", "b*").as_deref(), Some("/b*"));
        assert_eq!(join("/a", "/b*").as_deref(), Some("/a/b*"));
        assert_eq!(join("/a", "b*/").as_deref(), Some("/a/b*"));
        assert_eq!(join("/a", "b//c").as_deref(), Some("/a/b/c"));
        assert_eq!(join("/a", "").as_deref(), Some("/a"));
    }

    #[test]
    fn join_pattern_cleans_dot_segments() {
        let join = |directory: &str, pattern: &str| join_pattern(Path::new(directory), pattern);

        assert_eq!(join("/a", "./x").as_deref(), Some("/a/x"));
        assert_eq!(join("/a", "sub/../x").as_deref(), Some("/a/x"));
        assert_eq!(join("/a", "*/../x").as_deref(), Some("/a/x"));
        assert_eq!(join("/a/b", "../x").as_deref(), Some("/a/x"));
        assert_eq!(join("/a", "../../x").as_deref(), Some("/x"));
        assert_eq!(join("/a", ".").as_deref(), Some("/a"));
        assert_eq!(join("/[a]/b", "../x").as_deref(), Some("/[[]a[]]/x"));
    }

    #[test]
    fn join_pattern_rejects_non_unicode_directory() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let directory = Path::new(OsStr::from_bytes(b"/a/\xff"));
        assert_eq!(join_pattern(directory, "x"), None);
    }

    #[test]
    fn unclean_patterns_yield_clean_matches() {
        let fs = mock_tree(TREE);

        for pattern in ["./target1.txt", "target/../target1.txt", "target1.txt/"] {
            let result = run(&fs, TargetKind::File, "/root", None, &[pattern]).unwrap();
            assert_eq!(result, paths(&["/root/target1.txt"]), "pattern {pattern}");
        }
    }

    #[test]
    fn non_unicode_directory_is_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let fs = mock_tree(TREE);
        let start = Path::new(OsStr::from_bytes(b"/root/\xffdir/inner"));

        let result = ascend(
            TargetKind::File,
            start,
            None,
            &patterns(&["target1.txt"]),
            MatchOptions::new(),
            &fs,
        )
        .unwrap();
        assert_eq!(result, paths(&["/root/target1.txt"]));
    }

    #[test]
    fn empty_pattern_matches_directory_itself() {
        let fs = mock_tree(TREE);

        let result = run(&fs, TargetKind::Directory, "/root/sub1", None, &[""]).unwrap();
        assert_eq!(result, paths(&["/root/sub1"]));
    }
}
