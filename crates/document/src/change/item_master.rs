//! The item master update and its cascade into the other catalogs and the
//! grid.

use serde::{Deserialize, Serialize};

use crate::{CatalogItem, Document, DocumentError, MasterItem, validation};

/// Replaces one item master entry and rewrites every catalog item and
/// button linked to its previous code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItemMasterItem {
    pub before: MasterItem,
    pub after: MasterItem,
}

impl UpdateItemMasterItem {
    /// Creates the change. The new code and name are required, the unit
    /// price must be numeric, and cost and base prices must be numeric when
    /// given.
    pub fn new(before: MasterItem, after: MasterItem) -> Result<Self, DocumentError> {
        let after = MasterItem {
            item_code: validation::require_text("itemCode", &after.item_code)?,
            item_name_print: validation::require_text("itemNamePrint", &after.item_name_print)?,
            unit_price: validation::normalize_price("unitPrice", &after.unit_price)?,
            cost_price: validation::normalize_optional_price("costPrice", &after.cost_price)?,
            base_price: validation::normalize_optional_price("basePrice", &after.base_price)?,
        };
        Ok(Self { before, after })
    }

    pub(crate) fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let from_code = self.before.item_code.as_str();
        let rewritten_master = doc
            .require_item_master_catalog()?
            .replace(from_code, &self.after)?;

        let target = CatalogItem::new(
            self.after.item_code.clone(),
            self.after.item_name_print.clone(),
            self.after.unit_price.clone(),
        );
        let config = doc
            .config()
            .rewrite_item(from_code, &self.after.item_code, &self.after.unit_price);
        // Catalogs not materialized yet are left absent.
        let item_catalog = doc.item_catalog().map(|c| c.rewrite_item(from_code, &target));
        let handy_catalog = doc.handy_catalog().map(|c| c.rewrite_item(from_code, &target));

        Ok(Document::with_catalogs(
            config,
            item_catalog,
            handy_catalog,
            Some(rewritten_master),
        ))
    }
}
