//! Crate-local error taxonomy, folded into `nos_api::Error` the same
//! way `nos-error-handling` layers its own error enum on top of it.

extern crate alloc;

use core::fmt;

/// Errors specific to the compaction engine.
///
/// Per spec.md section 7, most of what a naive implementation would
/// treat as an error (invalid PFN, zone mismatch, unmovable block,
/// lock contention, fatal signal) is policy, not an exceptional path —
/// it is folded into a `CONTINUE`/`PARTIAL` status instead. The
/// variants here are reserved for the handful of cases that are
/// genuinely programmer or configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactionError {
    /// An extfrag threshold outside `[0, 1000]` was supplied.
    ThresholdOutOfRange,
}

impl fmt::Display for CompactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompactionError::ThresholdOutOfRange => {
                write!(f, "extfrag threshold must be in [0, 1000]")
            }
        }
    }
}

impl From<CompactionError> for nos_api::Error {
    fn from(err: CompactionError) -> Self {
        nos_api::Error::InvalidArgument(alloc::string::ToString::to_string(&err))
    }
}

/// Result type used throughout this crate.
pub type Result<T> = nos_api::Result<T>;
