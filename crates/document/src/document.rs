//! The versioned unit: grid configuration plus the three catalogs.

use serde::{Deserialize, Serialize};

use crate::{Catalog, DocumentError, ItemMasterCatalog, PosConfig};

/// Identifies one of the catalogs derived from the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogKind {
    Item,
    Handy,
    ItemMaster,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [CatalogKind::Item, CatalogKind::Handy, CatalogKind::ItemMaster];
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogKind::Item => write!(f, "item catalog"),
            CatalogKind::Handy => write!(f, "handy catalog"),
            CatalogKind::ItemMaster => write!(f, "item master catalog"),
        }
    }
}

/// Complete edit-relevant state at one point in history.
///
/// A catalog field that is `None` has not been derived from the original
/// source yet; `Some` means it is cached and may have been edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    config: PosConfig,
    item_catalog: Option<Catalog>,
    handy_catalog: Option<Catalog>,
    item_master_catalog: Option<ItemMasterCatalog>,
}

impl Document {
    /// Creates a document with no catalogs materialized.
    pub fn new(config: PosConfig) -> Self {
        Self {
            config,
            item_catalog: None,
            handy_catalog: None,
            item_master_catalog: None,
        }
    }

    pub fn with_catalogs(
        config: PosConfig,
        item_catalog: Option<Catalog>,
        handy_catalog: Option<Catalog>,
        item_master_catalog: Option<ItemMasterCatalog>,
    ) -> Self {
        Self {
            config,
            item_catalog,
            handy_catalog,
            item_master_catalog,
        }
    }

    // Query methods

    pub fn config(&self) -> &PosConfig {
        &self.config
    }

    pub fn item_catalog(&self) -> Option<&Catalog> {
        self.item_catalog.as_ref()
    }

    pub fn handy_catalog(&self) -> Option<&Catalog> {
        self.handy_catalog.as_ref()
    }

    pub fn item_master_catalog(&self) -> Option<&ItemMasterCatalog> {
        self.item_master_catalog.as_ref()
    }

    pub fn has_catalog(&self, kind: CatalogKind) -> bool {
        match kind {
            CatalogKind::Item => self.item_catalog.is_some(),
            CatalogKind::Handy => self.handy_catalog.is_some(),
            CatalogKind::ItemMaster => self.item_master_catalog.is_some(),
        }
    }

    pub fn require_handy_catalog(&self) -> Result<&Catalog, DocumentError> {
        self.handy_catalog()
            .ok_or(DocumentError::CatalogNotLoaded {
                kind: CatalogKind::Handy,
            })
    }

    pub fn require_item_master_catalog(&self) -> Result<&ItemMasterCatalog, DocumentError> {
        self.item_master_catalog()
            .ok_or(DocumentError::CatalogNotLoaded {
                kind: CatalogKind::ItemMaster,
            })
    }

    // Derived documents

    pub fn with_config(&self, config: PosConfig) -> Self {
        Self {
            config,
            ..self.clone()
        }
    }

    pub fn with_handy_catalog(&self, handy_catalog: Catalog) -> Self {
        Self {
            handy_catalog: Some(handy_catalog),
            ..self.clone()
        }
    }

    /// Fills each absent catalog from the given values. Catalogs already
    /// present are kept as they are, including any edits made to them.
    pub fn fill_missing_catalogs(
        &self,
        item_catalog: &Catalog,
        handy_catalog: &Catalog,
        item_master_catalog: &ItemMasterCatalog,
    ) -> Self {
        Self {
            config: self.config.clone(),
            item_catalog: Some(self.item_catalog.clone().unwrap_or_else(|| item_catalog.clone())),
            handy_catalog: Some(self.handy_catalog.clone().unwrap_or_else(|| handy_catalog.clone())),
            item_master_catalog: Some(
                self.item_master_catalog
                    .clone()
                    .unwrap_or_else(|| item_master_catalog.clone()),
            ),
        }
    }
}
