//! Error taxonomy for retrieval and local storage

use thiserror::Error;

/// Failure to obtain a usable remote tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, timeout, non-success status or unreadable body
    #[error("transport error: {0}")]
    Transport(String),
    /// Body was not the shape expected for the requested taxonomy
    #[error("malformed remote data: {0}")]
    MalformedData(String),
}

/// Failure reported by a [`crate::TermStore`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("insert of '{name}' rejected: {reason}")]
    InsertRejected { name: String, reason: String },
    #[error("lookup failed: {0}")]
    LookupFailed(String),
}

impl StoreError {
    pub fn rejected(name: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::InsertRejected {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
