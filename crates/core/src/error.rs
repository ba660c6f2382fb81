use std::io;

use thiserror::Error;

/// Why one input was left out of the comparison set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("file not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("unreadable: {0}")]
    Unreadable(String),
    #[error("file is {size} bytes, limit is {max}")]
    TooLarge { size: u64, max: u64 },
    #[error("binary content")]
    Binary,
    #[error("nothing left after cleansing")]
    EmptyAfterCleansing,
    #[error("cleansed line of {length} bytes exceeds limit of {max}")]
    LineTooLong { length: usize, max: usize },
    #[error("line index size overflows")]
    LineIndexOverflow,
    #[error("skipped: file count limit of {max} reached")]
    FileLimit { max: usize },
}

impl RejectReason {
    pub(crate) fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => RejectReason::NotFound,
            io::ErrorKind::PermissionDenied => RejectReason::PermissionDenied,
            _ => RejectReason::Unreadable(err.to_string()),
        }
    }
}

/// Failures that abort a whole run.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("failed to allocate {what}")]
    Allocation { what: &'static str },
    #[error("pair table for {files} files does not fit in memory")]
    PairTableOverflow { files: usize },
}

pub type CheckResult<T> = Result<T, CheckError>;
