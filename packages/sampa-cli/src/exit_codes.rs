//! Process exit codes for the `sampa` binary

pub const SUCCESS: i32 = 0;
/// Bad arguments, missing or unreadable input
pub const INPUT_ERROR: i32 = 1;
/// Failure while filtering or writing results
pub const EXECUTION_ERROR: i32 = 2;
/// At least one channel was rejected (only with --fail-on-reject)
pub const REJECTED: i32 = 3;
/// Some files in a batch failed
pub const PARTIAL_FAILURE: i32 = 4;
