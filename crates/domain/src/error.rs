//! Domain error types.

use common::DraftId;
use document::{DocumentError, ErrorKind};
use thiserror::Error;

/// Navigation failures on a draft's history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The draft is already at its oldest entry.
    #[error("undo not available")]
    NothingToUndo,

    /// The draft is already at its newest entry.
    #[error("redo not available")]
    NothingToRedo,

    #[error("history index out of range: {index} (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A stored draft carried no history entries.
    #[error("draft history is empty")]
    EmptyHistory,
}

impl HistoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HistoryError::NothingToUndo | HistoryError::NothingToRedo => ErrorKind::EndOfHistory,
            HistoryError::IndexOutOfRange { .. } => ErrorKind::InvalidArgument,
            HistoryError::EmptyHistory => ErrorKind::IllegalState,
        }
    }
}

/// Failure reported by a reader or exporter of the original source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("source error: {message}")]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure reported by a draft store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("store error: {message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur during draft operations.
#[derive(Debug, Error)]
pub enum DraftError {
    /// A change was rejected by the document.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Undo, redo or jump could not be performed.
    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("draft not found: {0}")]
    DraftNotFound(DraftId),

    /// The original source could not be read or exported.
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// An internal expectation did not hold.
    #[error("illegal state: {0}")]
    IllegalState(String),
}

impl DraftError {
    /// Returns the broad classification of this error.
    ///
    /// Source and store failures come from collaborators and are reported as
    /// `IllegalState`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DraftError::Document(e) => e.kind(),
            DraftError::History(e) => e.kind(),
            DraftError::DraftNotFound(_) => ErrorKind::NotFound,
            DraftError::Source(_) | DraftError::Store(_) | DraftError::IllegalState(_) => {
                ErrorKind::IllegalState
            }
        }
    }
}
