//! Immutable document model of a POS configuration and the changes that
//! transform it.
//!
//! This crate provides:
//! - The grid layout (`PosConfig`) with categories, pages and buttons
//! - The item, handy and item master catalogs
//! - `Document`, the unit that is versioned by a draft's history
//! - `Change`, the closed set of edits applicable to a document
//!
//! Collections are persistent (`im`), so a document derived by a localized
//! edit shares everything it did not touch with its predecessor.

pub mod catalog;
pub mod change;
pub mod document;
pub mod error;
pub mod grid;
pub mod item_master;
pub mod validation;

pub use catalog::{Catalog, CatalogCategory, CatalogItem};
pub use change::{
    AddButton, AddCategory, AddHandyCategory, AddHandyItem, Change, DeleteButton, DeleteCategory,
    DeleteHandyCategory, DeleteHandyItem, ReorderHandyCategories, ReorderHandyItems, SwapButtons,
    SwapCategories, SwapHandyCategories, UpdateCategoryGrid, UpdateItemMasterItem, UpdateUnitPrice,
    resolve_insert_index,
};
pub use document::{CatalogKind, Document};
pub use error::{DocumentError, ErrorKind};
pub use grid::{Button, ConfigSeed, GridCategory, Page, PageButton, PosConfig};
pub use item_master::{ItemMasterCatalog, MasterItem};
