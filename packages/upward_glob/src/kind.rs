use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Which kinds of filesystem entries a search accepts as matches.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TargetKind {
    /// Only entries that are not directories.
    File,

    /// Only directories.
    Directory,

    /// Any entry, regardless of its type. No status query is made for matched entries.
    #[default]
    Any,
}

impl TargetKind {
    /// Whether an entry with the given directory-ness is accepted by this kind.
    #[must_use]
    pub const fn accepts_directory(self, is_directory: bool) -> bool {
        match self {
            Self::File => !is_directory,
            Self::Directory => is_directory,
            Self::Any => true,
        }
    }

    /// Whether accepting an entry requires knowing if it is a directory.
    pub(crate) const fn needs_status(self) -> bool {
        !matches!(self, Self::Any)
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
            Self::Any => write!(f, "any"),
        }
    }
}

impl FromStr for TargetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "dir" | "directory" => Ok(Self::Directory),
            "any" | "all" | "either" => Ok(Self::Any),
            _ => Err(Error::InvalidTargetKind {
                value: s.to_string(),
            }),
        }
    }
}
