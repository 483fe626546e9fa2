// Error taxonomy for display queries and HDR state changes.

use thiserror::Error;

/// Coarse classification of [`HdrError`], for callers that branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An OS display-configuration call failed.
    Platform,
    /// The selection criterion matched nothing.
    Selection,
    /// The display cannot do the requested operation.
    Unsupported,
}

#[derive(Debug, Error)]
pub enum HdrError {
    /// A DisplayConfig call returned a non-success code.
    #[error("{api} failed with error code: {code}")]
    Platform { api: &'static str, code: u32 },

    #[error("Cannot find display with index {index}. There is/are only {count} display(s)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Cannot find display with target id {0}")]
    IdNotFound(u32),

    #[error("Cannot find display with name [{0}]")]
    NameNotFound(String),

    #[error("The display does not support HDR")]
    HdrNotSupported,
}

impl HdrError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HdrError::Platform { .. } => ErrorKind::Platform,
            HdrError::IndexOutOfRange { .. }
            | HdrError::IdNotFound(_)
            | HdrError::NameNotFound(_) => ErrorKind::Selection,
            HdrError::HdrNotSupported => ErrorKind::Unsupported,
        }
    }
}

pub type Result<T> = std::result::Result<T, HdrError>;
