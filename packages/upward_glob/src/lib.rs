#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Locates files or directories by glob pattern in the nearest ancestor directory that contains
//! a match.
//!
//! A search starts in some directory and expands every pattern there. If nothing of the requested
//! [kind][TargetKind] matches, it moves on to the parent directory and tries again, until it
//! either finds a directory with at least one match, passes a boundary directory or reaches the
//! filesystem root. This is how tools find the configuration file, lock file or repository
//! marker that applies to wherever they were started from.
//!
//! The nearest directory with any match wins outright: all of its matches (from all patterns) are
//! returned and no farther ancestor is consulted.
//!
//! # Example
//!
//! ```
//! use std::fs;
//!
//! use upward_glob::{TargetKind, search_in};
//!
//! // project/
//! //   rustfmt.toml
//! //   src/
//! //     nested/
//! let project = tempfile::tempdir().unwrap();
//! fs::create_dir_all(project.path().join("src/nested")).unwrap();
//! fs::write(project.path().join("rustfmt.toml"), "").unwrap();
//!
//! let matches = search_in(
//!     project.path(),
//!     TargetKind::File,
//!     "src/nested",
//!     project.path(),
//!     ["rustfmt.toml", ".rustfmt.toml"],
//! )
//! .unwrap();
//!
//! assert_eq!(matches, vec![project.path().join("rustfmt.toml")]);
//! ```
//!
//! Finding nothing is reported as [`Error::NotFound`], which callers will usually want to handle
//! separately from other errors:
//!
//! ```
//! use upward_glob::{Search, TargetKind};
//!
//! let empty = tempfile::tempdir().unwrap();
//!
//! let result = Search::new(TargetKind::Directory)
//!     .starting_at(empty.path())
//!     .bounded_by(empty.path())
//!     .pattern(".git")
//!     .run();
//!
//! match result {
//!     Ok(matches) => println!("Repository marker at {}", matches[0].display()),
//!     Err(error) if error.is_not_found() => println!("Not in a repository"),
//!     Err(error) => panic!("search failed: {error}"),
//! }
//! ```
//!
//! # Paths
//!
//! Start and boundary directories are made absolute and normalized lexically before the search:
//! `.` components are dropped and `..` components remove the preceding component. Symbolic
//! links are not resolved. A boundary is recognized by exact equality with a visited directory.
//!
//! # Patterns
//!
//! Patterns use the syntax of the [`glob`] crate and are matched relative to each visited
//! directory, so they may contain path separators (`config/*.toml`). Special characters in the
//! visited directory paths themselves are matched literally.
//!
//! Patterns are cleaned before use: `.` segments and trailing separators are dropped and `..`
//! removes the preceding segment, so `./Cargo.toml/` and `src/../Cargo.toml` both find
//! `Cargo.toml` and return it without the extra segments.
//!
//! Directories whose paths are not valid Unicode cannot be expressed as glob patterns. Such
//! directories are skipped (with a warning logged) and the search continues with their parent.

mod ascent;
mod builder;
mod error;
mod kind;
mod pal;
mod paths;
mod shortcuts;

pub use builder::*;
pub use error::*;
pub use kind::*;
pub use shortcuts::*;
