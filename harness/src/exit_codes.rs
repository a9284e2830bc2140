//! Stable exit codes for the `practice` CLI.

/// Command succeeded; for `run`, every case passed.
pub const OK: i32 = 0;
/// Invalid config, unknown exercise, or other errors.
pub const INVALID: i32 = 1;
/// `run` produced results but at least one case failed.
pub const FAILED: i32 = 2;
/// `run` produced no results: the implementation could not be evaluated.
pub const UNEVALUATED: i32 = 3;
