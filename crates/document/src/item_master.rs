//! The item master: authoritative names and prices keyed by item code.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MasterItem {
    pub item_code: String,
    pub item_name_print: String,
    pub unit_price: String,
    pub cost_price: String,
    pub base_price: String,
}

impl MasterItem {
    /// Builds an entry from raw text. Codes are checked by
    /// [`ItemMasterCatalog::new`]; operator input is validated by
    /// `UpdateItemMasterItem::new`.
    pub fn new(
        item_code: impl Into<String>,
        item_name_print: impl Into<String>,
        unit_price: impl Into<String>,
        cost_price: impl Into<String>,
        base_price: impl Into<String>,
    ) -> Self {
        Self {
            item_code: item_code.into(),
            item_name_print: item_name_print.into(),
            unit_price: unit_price.into(),
            cost_price: cost_price.into(),
            base_price: base_price.into(),
        }
    }
}

/// Ordered master items; item codes are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMasterCatalog {
    items: Vector<MasterItem>,
}

impl ItemMasterCatalog {
    /// Creates the catalog, rejecting blank or repeated item codes.
    pub fn new(items: impl IntoIterator<Item = MasterItem>) -> Result<Self, DocumentError> {
        let mut catalog = Self::default();
        for item in items {
            if item.item_code.trim().is_empty() {
                return Err(DocumentError::Required { field: "itemCode" });
            }
            if catalog.find_item(&item.item_code).is_some() {
                return Err(DocumentError::DuplicateItemCode {
                    item_code: item.item_code,
                });
            }
            catalog.items.push_back(item);
        }
        Ok(catalog)
    }

    pub fn items(&self) -> &Vector<MasterItem> {
        &self.items
    }

    pub fn find_item(&self, item_code: &str) -> Option<&MasterItem> {
        self.items.iter().find(|i| i.item_code == item_code)
    }

    /// Replaces the entry for `from_code` with `to`.
    ///
    /// Fails if `from_code` is unknown or if `to` renames the entry onto a
    /// code another entry already uses.
    pub fn replace(&self, from_code: &str, to: &MasterItem) -> Result<Self, DocumentError> {
        let index = self
            .items
            .iter()
            .position(|i| i.item_code == from_code)
            .ok_or_else(|| DocumentError::ItemMasterItemNotFound {
                item_code: from_code.to_string(),
            })?;
        if to.item_code != from_code
            && self
                .items
                .iter()
                .enumerate()
                .any(|(i, item)| i != index && item.item_code == to.item_code)
        {
            return Err(DocumentError::DuplicateItemCode {
                item_code: to.item_code.clone(),
            });
        }
        let mut items = self.items.clone();
        items.set(index, to.clone());
        Ok(Self { items })
    }
}
