// Filesystem abstraction for upward_glob.
//
// Provides a mockable interface over the directory listing and status queries made while
// ascending the directory tree.

mod abstractions;
mod facade;
mod real;

pub(crate) use abstractions::*;
pub(crate) use facade::*;
pub(crate) use real::*;
