//! Document error types.

use common::ButtonId;
use thiserror::Error;

use crate::document::CatalogKind;

/// Broad classification of a failure, independent of the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced draft, page, category, button or catalog entry does not exist.
    NotFound,

    /// Structurally invalid input (blank field, bad index, duplicate key, bounds).
    InvalidArgument,

    /// An internal consistency expectation was violated.
    IllegalState,

    /// Undo or redo was requested at the end of the history.
    EndOfHistory,
}

/// Errors raised while building or applying a change to a document.
///
/// A change that returns one of these leaves the input document untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("page not found: {page_number}")]
    PageNotFound { page_number: u32 },

    #[error("category not found: {page_number}")]
    CategoryNotFound { page_number: u32 },

    #[error("button not found: {button_id}")]
    ButtonNotFound { button_id: ButtonId },

    #[error("handy category not found: {code}")]
    HandyCategoryNotFound { code: String },

    #[error("category not found in catalog: {code}")]
    CatalogCategoryNotFound { code: String },

    #[error("item not found in category {category_code}: {item_code}")]
    CatalogItemNotFound {
        category_code: String,
        item_code: String,
    },

    #[error("item not found in item master: {item_code}")]
    ItemMasterItemNotFound { item_code: String },

    /// The change needs a catalog that has not been derived from the source yet.
    #[error("{kind} is not loaded")]
    CatalogNotLoaded { kind: CatalogKind },

    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be numeric: {value}")]
    NotNumeric { field: &'static str, value: String },

    #[error("{field} out of range: {index} (len {len})")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error("duplicate buttonId: {button_id}")]
    DuplicateButtonId { button_id: ButtonId },

    #[error("cell is already occupied: ({col},{row})")]
    CellOccupied { col: u32, row: u32 },

    #[error("cell out of range: ({col},{row}) on a {cols}x{rows} grid")]
    CellOutOfBounds { col: u32, row: u32, cols: u32, rows: u32 },

    /// Grid coordinates are 1-based.
    #[error("button position must be 1-based: ({col},{row})")]
    InvalidPosition { col: u32, row: u32 },

    /// Shrinking a grid would leave this button outside the new bounds.
    #[error("button out of range for resized grid: ({col},{row})")]
    ButtonOutOfRange { col: u32, row: u32 },

    #[error("invalid grid size: {cols}x{rows}")]
    InvalidGridSize { cols: u32, rows: u32 },

    #[error("category/page mismatch for page {page_number}")]
    PageMismatch { page_number: u32 },

    #[error("page number must be positive: {page_number}")]
    InvalidPageNumber { page_number: u32 },

    #[error("itemCode already exists: {item_code}")]
    DuplicateItemCode { item_code: String },

    #[error("handy category already exists: {code}")]
    DuplicateHandyCategory { code: String },

    #[error("duplicate category code in catalog: {code}")]
    DuplicateCategoryCode { code: String },

    /// The entry at the recorded position no longer matches the recorded snapshot.
    #[error("{what} mismatch: expected {expected}, found {actual}")]
    SnapshotMismatch {
        what: &'static str,
        expected: String,
        actual: String,
    },
}

impl DocumentError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DocumentError::PageNotFound { .. }
            | DocumentError::CategoryNotFound { .. }
            | DocumentError::ButtonNotFound { .. }
            | DocumentError::HandyCategoryNotFound { .. }
            | DocumentError::CatalogCategoryNotFound { .. }
            | DocumentError::CatalogItemNotFound { .. }
            | DocumentError::ItemMasterItemNotFound { .. } => ErrorKind::NotFound,
            DocumentError::CatalogNotLoaded { .. } => ErrorKind::IllegalState,
            DocumentError::Required { .. }
            | DocumentError::NotNumeric { .. }
            | DocumentError::IndexOutOfRange { .. }
            | DocumentError::DuplicateButtonId { .. }
            | DocumentError::CellOccupied { .. }
            | DocumentError::CellOutOfBounds { .. }
            | DocumentError::InvalidPosition { .. }
            | DocumentError::ButtonOutOfRange { .. }
            | DocumentError::InvalidGridSize { .. }
            | DocumentError::PageMismatch { .. }
            | DocumentError::InvalidPageNumber { .. }
            | DocumentError::DuplicateItemCode { .. }
            | DocumentError::DuplicateHandyCategory { .. }
            | DocumentError::DuplicateCategoryCode { .. }
            | DocumentError::SnapshotMismatch { .. } => ErrorKind::InvalidArgument,
        }
    }
}
