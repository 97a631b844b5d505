// Platform abstraction layer for upward_glob.
//
// This module provides abstractions over filesystem operations to enable mocking in tests.
// The pattern follows the three-layer approach: abstraction (trait) → facade (enum) → real
// implementation.

mod filesystem;

pub(crate) use filesystem::*;
