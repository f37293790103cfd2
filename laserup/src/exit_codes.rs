//! Stable exit codes for laserup commands.
//!
//! `laserup run` propagates the engine's own exit code when the engine was
//! launched; the codes below cover everything before that point.

/// Command succeeded.
pub const OK: i32 = 0;
/// Generic failure: bad config, IO error, provisioning or install failure.
pub const FAILURE: i32 = 1;
/// The required Python runtime was not found.
pub const NO_RUNTIME: i32 = 2;
/// The input directory is missing or empty (nothing to process).
pub const NO_INPUT: i32 = 3;
