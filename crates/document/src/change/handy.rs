//! Changes to the handy catalog. All of them require the handy catalog to
//! be materialized in the document they are applied to.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{CatalogCategory, CatalogItem, Document, DocumentError, validation};

/// Inserts a new handy category at a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddHandyCategory {
    pub insert_index: usize,
    pub category: CatalogCategory,
}

impl AddHandyCategory {
    pub fn new(insert_index: usize, category: CatalogCategory) -> Result<Self, DocumentError> {
        let code = validation::require_text("categoryCode", &category.code)?;
        Ok(Self {
            insert_index,
            category: CatalogCategory { code, ..category },
        })
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let handy = doc
            .require_handy_catalog()?
            .insert_category(self.insert_index, self.category.clone())?;
        Ok(doc.with_handy_catalog(handy))
    }
}

/// Removes the handy category at an index.
///
/// Carries the removed category so the edit can be audited; applying checks
/// that the category at the index still has the recorded code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteHandyCategory {
    pub category_index: usize,
    pub removed_category: CatalogCategory,
}

impl DeleteHandyCategory {
    pub fn new(category_index: usize, removed_category: CatalogCategory) -> Self {
        Self {
            category_index,
            removed_category,
        }
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let handy = doc
            .require_handy_catalog()?
            .remove_category(self.category_index, &self.removed_category.code)?;
        Ok(doc.with_handy_catalog(handy))
    }
}

/// Moves one handy category to another position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderHandyCategories {
    pub from_index: usize,
    pub to_index: usize,
}

impl ReorderHandyCategories {
    pub fn new(from_index: usize, to_index: usize) -> Self {
        Self {
            from_index,
            to_index,
        }
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let handy = doc
            .require_handy_catalog()?
            .move_category(self.from_index, self.to_index)?;
        Ok(doc.with_handy_catalog(handy))
    }
}

/// Exchanges the positions of two handy categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapHandyCategories {
    pub from_code: String,
    pub to_code: String,
}

impl SwapHandyCategories {
    pub fn new(from_code: &str, to_code: &str) -> Result<Self, DocumentError> {
        Ok(Self {
            from_code: validation::require_text("fromCategoryCode", from_code)?,
            to_code: validation::require_text("toCategoryCode", to_code)?,
        })
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let handy = doc
            .require_handy_catalog()?
            .swap_categories(&self.from_code, &self.to_code)?;
        Ok(doc.with_handy_catalog(handy))
    }
}

/// Inserts an item into a handy category at a precomputed position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddHandyItem {
    pub category_code: String,
    pub insert_index: usize,
    pub item: CatalogItem,
}

impl AddHandyItem {
    pub fn new(category_code: &str, insert_index: usize, item: CatalogItem) -> Result<Self, DocumentError> {
        Ok(Self {
            category_code: validation::require_text("categoryCode", category_code)?,
            insert_index,
            item,
        })
    }

    /// Builds the change for copying `item_code` from `source` into `handy`,
    /// positioned by [`resolve_insert_index`]. An item without a name takes
    /// its code as name.
    pub fn from_source(
        handy: &CatalogCategory,
        source: &CatalogCategory,
        item_code: &str,
    ) -> Result<Self, DocumentError> {
        let source_item = source
            .find_item(item_code)
            .ok_or_else(|| DocumentError::CatalogItemNotFound {
                category_code: source.code.clone(),
                item_code: item_code.to_string(),
            })?;
        let item_name = if source_item.item_name.trim().is_empty() {
            source_item.item_code.clone()
        } else {
            source_item.item_name.clone()
        };
        let item = CatalogItem::new(
            source_item.item_code.clone(),
            item_name,
            source_item.unit_price.clone(),
        );
        Self::new(&handy.code, resolve_insert_index(handy, source, item_code), item)
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let handy = doc.require_handy_catalog()?.insert_item(
            &self.category_code,
            self.insert_index,
            self.item.clone(),
        )?;
        Ok(doc.with_handy_catalog(handy))
    }
}

/// Removes the item at an index within a handy category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteHandyItem {
    pub category_code: String,
    pub item_index: usize,
    pub removed_item: CatalogItem,
}

impl DeleteHandyItem {
    pub fn new(category_code: &str, item_index: usize, removed_item: CatalogItem) -> Result<Self, DocumentError> {
        Ok(Self {
            category_code: validation::require_text("categoryCode", category_code)?,
            item_index,
            removed_item,
        })
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let handy = doc
            .require_handy_catalog()?
            .remove_item(&self.category_code, self.item_index)?;
        Ok(doc.with_handy_catalog(handy))
    }
}

/// Moves one item within its handy category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderHandyItems {
    pub category_code: String,
    pub from_index: usize,
    pub to_index: usize,
}

impl ReorderHandyItems {
    pub fn new(category_code: &str, from_index: usize, to_index: usize) -> Result<Self, DocumentError> {
        Ok(Self {
            category_code: validation::require_text("categoryCode", category_code)?,
            from_index,
            to_index,
        })
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let handy = doc.require_handy_catalog()?.move_item(
            &self.category_code,
            self.from_index,
            self.to_index,
        )?;
        Ok(doc.with_handy_catalog(handy))
    }
}

/// Position at which `item_code` should enter `handy` so that items keep
/// the relative order they have in `source`.
///
/// Returns the index of the first existing item whose source order is
/// greater than the new item's, skipping items unknown to the source. Falls
/// back to appending when the item is not in the source or nothing follows
/// it.
pub fn resolve_insert_index(handy: &CatalogCategory, source: &CatalogCategory, item_code: &str) -> usize {
    let mut order_by_code: HashMap<&str, usize> = HashMap::new();
    for item in source.items.iter() {
        let next = order_by_code.len();
        order_by_code.entry(item.item_code.as_str()).or_insert(next);
    }

    let Some(&target) = order_by_code.get(item_code) else {
        return handy.items.len();
    };

    handy
        .items
        .iter()
        .position(|existing| {
            order_by_code
                .get(existing.item_code.as_str())
                .is_some_and(|&order| order > target)
        })
        .unwrap_or(handy.items.len())
}
