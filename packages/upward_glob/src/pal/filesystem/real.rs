// Real filesystem implementation that delegates to the glob crate, std::fs and std::env.

use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, PatternError};
use tracing::warn;

use crate::pal::Filesystem;

/// Real filesystem implementation that uses the operating system's filesystem.
#[derive(Debug, Default)]
pub(crate) struct BuildTargetFilesystem;

// Thin forwarder to system APIs - exercised by the integration tests.
#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg_attr(test, mutants::skip)]
impl Filesystem for BuildTargetFilesystem {
    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn glob(&self, pattern: &str, options: MatchOptions) -> Result<Vec<PathBuf>, PatternError> {
        let paths = glob::glob_with(pattern, options)?;

        Ok(paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(error) => {
                    warn!(
                        path = %error.path().display(),
                        error = %error.error(),
                        "skipping unreadable entry during glob expansion"
                    );
                    None
                }
            })
            .collect())
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        std::fs::metadata(path).map(|metadata| metadata.is_dir())
    }
}
