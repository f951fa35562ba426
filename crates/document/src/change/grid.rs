//! Changes to the POS grid: buttons, categories and their pages.

use common::ButtonId;
use serde::{Deserialize, Serialize};

use crate::{Button, Document, DocumentError, validation};

/// Places a new button on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddButton {
    pub page_number: u32,
    pub button: Button,
}

impl AddButton {
    pub fn new(page_number: u32, button: Button) -> Self {
        Self {
            page_number,
            button,
        }
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let config = doc.config().add_button(self.page_number, self.button.clone())?;
        Ok(doc.with_config(config))
    }
}

/// Removes a button by its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteButton {
    pub page_number: u32,
    pub button_id: ButtonId,
}

impl DeleteButton {
    pub fn new(page_number: u32, button_id: ButtonId) -> Result<Self, DocumentError> {
        if button_id.is_blank() {
            return Err(DocumentError::Required { field: "buttonId" });
        }
        Ok(Self {
            page_number,
            button_id,
        })
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let config = doc.config().delete_button(self.page_number, &self.button_id)?;
        Ok(doc.with_config(config))
    }
}

/// Exchanges the contents of two cells on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapButtons {
    pub page_number: u32,
    pub from_col: u32,
    pub from_row: u32,
    pub to_col: u32,
    pub to_row: u32,
}

impl SwapButtons {
    pub fn new(page_number: u32, from_col: u32, from_row: u32, to_col: u32, to_row: u32) -> Self {
        Self {
            page_number,
            from_col,
            from_row,
            to_col,
            to_row,
        }
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let config = doc.config().swap_buttons(
            self.page_number,
            (self.from_col, self.from_row),
            (self.to_col, self.to_row),
        )?;
        Ok(doc.with_config(config))
    }
}

/// Appends a category with an empty page at the next free page number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCategory {
    pub name: String,
    pub cols: u32,
    pub rows: u32,
    pub style_key: u32,
}

impl AddCategory {
    pub fn new(name: impl Into<String>, cols: u32, rows: u32, style_key: u32) -> Result<Self, DocumentError> {
        if cols == 0 || rows == 0 {
            return Err(DocumentError::InvalidGridSize { cols, rows });
        }
        Ok(Self {
            name: name.into(),
            cols,
            rows,
            style_key,
        })
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let config = doc
            .config()
            .add_category(&self.name, self.cols, self.rows, self.style_key)?;
        Ok(doc.with_config(config))
    }
}

/// Removes a category together with its page and buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCategory {
    pub page_number: u32,
}

impl DeleteCategory {
    pub fn new(page_number: u32) -> Self {
        Self { page_number }
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let config = doc.config().delete_category(self.page_number)?;
        Ok(doc.with_config(config))
    }
}

/// Exchanges metadata and page contents between two page numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapCategories {
    pub from_page_number: u32,
    pub to_page_number: u32,
}

impl SwapCategories {
    pub fn new(from_page_number: u32, to_page_number: u32) -> Self {
        Self {
            from_page_number,
            to_page_number,
        }
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let config = doc
            .config()
            .swap_categories(self.from_page_number, self.to_page_number)?;
        Ok(doc.with_config(config))
    }
}

/// Resizes a category and its page.
///
/// The previous size is recorded alongside the new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCategoryGrid {
    pub page_number: u32,
    pub old_cols: u32,
    pub old_rows: u32,
    pub new_cols: u32,
    pub new_rows: u32,
}

impl UpdateCategoryGrid {
    pub fn new(
        page_number: u32,
        old_cols: u32,
        old_rows: u32,
        new_cols: u32,
        new_rows: u32,
    ) -> Result<Self, DocumentError> {
        if new_cols == 0 || new_rows == 0 {
            return Err(DocumentError::InvalidGridSize {
                cols: new_cols,
                rows: new_rows,
            });
        }
        Ok(Self {
            page_number,
            old_cols,
            old_rows,
            new_cols,
            new_rows,
        })
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let config = doc
            .config()
            .resize_category(self.page_number, self.new_cols, self.new_rows)?;
        Ok(doc.with_config(config))
    }
}

/// Sets the price of one button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUnitPrice {
    pub page_number: u32,
    pub button_id: ButtonId,
    pub old_unit_price: String,
    pub new_unit_price: String,
}

impl UpdateUnitPrice {
    /// Creates the change; `new_unit_price` is normalised and must be numeric.
    pub fn new(
        page_number: u32,
        button_id: ButtonId,
        old_unit_price: impl Into<String>,
        new_unit_price: &str,
    ) -> Result<Self, DocumentError> {
        if button_id.is_blank() {
            return Err(DocumentError::Required { field: "buttonId" });
        }
        Ok(Self {
            page_number,
            button_id,
            old_unit_price: old_unit_price.into(),
            new_unit_price: validation::normalize_price("unitPrice", new_unit_price)?,
        })
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let config = doc.config().update_unit_price(
            self.page_number,
            &self.button_id,
            &self.new_unit_price,
        )?;
        Ok(doc.with_config(config))
    }
}
