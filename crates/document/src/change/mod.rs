//! Changes: self-contained transformations from one document to the next.
//!
//! Every change carries all the data it needs, so replaying it against the
//! same document always yields the same result. A failing change leaves the
//! input document untouched.

mod grid;
mod handy;
mod item_master;

use serde::{Deserialize, Serialize};

use crate::{Document, DocumentError};

pub use grid::{
    AddButton, AddCategory, DeleteButton, DeleteCategory, SwapButtons, SwapCategories,
    UpdateCategoryGrid, UpdateUnitPrice,
};
pub use handy::{
    AddHandyCategory, AddHandyItem, DeleteHandyCategory, DeleteHandyItem, ReorderHandyCategories,
    ReorderHandyItems, SwapHandyCategories, resolve_insert_index,
};
pub use item_master::UpdateItemMasterItem;

/// All supported edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Change {
    AddButton(AddButton),
    DeleteButton(DeleteButton),
    SwapButtons(SwapButtons),
    AddCategory(AddCategory),
    DeleteCategory(DeleteCategory),
    SwapCategories(SwapCategories),
    UpdateCategoryGrid(UpdateCategoryGrid),
    UpdateUnitPrice(UpdateUnitPrice),
    AddHandyCategory(AddHandyCategory),
    DeleteHandyCategory(DeleteHandyCategory),
    ReorderHandyCategories(ReorderHandyCategories),
    SwapHandyCategories(SwapHandyCategories),
    AddHandyItem(AddHandyItem),
    DeleteHandyItem(DeleteHandyItem),
    ReorderHandyItems(ReorderHandyItems),
    UpdateItemMasterItem(UpdateItemMasterItem),
}

impl Change {
    /// Applies this change, producing the next document.
    pub fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let result = match self {
            Change::AddButton(c) => c.apply(doc),
            Change::DeleteButton(c) => c.apply(doc),
            Change::SwapButtons(c) => c.apply(doc),
            Change::AddCategory(c) => c.apply(doc),
            Change::DeleteCategory(c) => c.apply(doc),
            Change::SwapCategories(c) => c.apply(doc),
            Change::UpdateCategoryGrid(c) => c.apply(doc),
            Change::UpdateUnitPrice(c) => c.apply(doc),
            Change::AddHandyCategory(c) => c.apply(doc),
            Change::DeleteHandyCategory(c) => c.apply(doc),
            Change::ReorderHandyCategories(c) => c.apply(doc),
            Change::SwapHandyCategories(c) => c.apply(doc),
            Change::AddHandyItem(c) => c.apply(doc),
            Change::DeleteHandyItem(c) => c.apply(doc),
            Change::ReorderHandyItems(c) => c.apply(doc),
            Change::UpdateItemMasterItem(c) => c.apply(doc),
        };
        if let Err(err) = &result {
            tracing::debug!(change = self.change_type(), error = %err, "change rejected");
        }
        result
    }

    /// Returns the change type name.
    pub fn change_type(&self) -> &'static str {
        match self {
            Change::AddButton(_) => "AddButton",
            Change::DeleteButton(_) => "DeleteButton",
            Change::SwapButtons(_) => "SwapButtons",
            Change::AddCategory(_) => "AddCategory",
            Change::DeleteCategory(_) => "DeleteCategory",
            Change::SwapCategories(_) => "SwapCategories",
            Change::UpdateCategoryGrid(_) => "UpdateCategoryGrid",
            Change::UpdateUnitPrice(_) => "UpdateUnitPrice",
            Change::AddHandyCategory(_) => "AddHandyCategory",
            Change::DeleteHandyCategory(_) => "DeleteHandyCategory",
            Change::ReorderHandyCategories(_) => "ReorderHandyCategories",
            Change::SwapHandyCategories(_) => "SwapHandyCategories",
            Change::AddHandyItem(_) => "AddHandyItem",
            Change::DeleteHandyItem(_) => "DeleteHandyItem",
            Change::ReorderHandyItems(_) => "ReorderHandyItems",
            Change::UpdateItemMasterItem(_) => "UpdateItemMasterItem",
        }
    }
}

macro_rules! impl_from_change {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Change {
                fn from(change: $variant) -> Self {
                    Change::$variant(change)
                }
            }
        )*
    };
}

impl_from_change!(
    AddButton,
    DeleteButton,
    SwapButtons,
    AddCategory,
    DeleteCategory,
    SwapCategories,
    UpdateCategoryGrid,
    UpdateUnitPrice,
    AddHandyCategory,
    DeleteHandyCategory,
    ReorderHandyCategories,
    SwapHandyCategories,
    AddHandyItem,
    DeleteHandyItem,
    ReorderHandyItems,
    UpdateItemMasterItem,
);
