//! Item catalogs: the POS item catalog and the handy (handheld) catalog
//! share this shape.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// One orderable item inside a catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogItem {
    pub item_code: String,
    pub item_name: String,
    pub unit_price: String,
}

impl CatalogItem {
    pub fn new(
        item_code: impl Into<String>,
        item_name: impl Into<String>,
        unit_price: impl Into<String>,
    ) -> Self {
        Self {
            item_code: item_code.into(),
            item_name: item_name.into(),
            unit_price: unit_price.into(),
        }
    }
}

/// A named group of items. Item codes may repeat inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCategory {
    pub code: String,
    pub description: String,
    pub items: Vector<CatalogItem>,
}

impl CatalogCategory {
    /// Builds a category record. The code is checked when the category is
    /// placed into a [`Catalog`].
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        items: impl IntoIterator<Item = CatalogItem>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            items: items.into_iter().collect(),
        }
    }

    /// Returns the first item carrying this code.
    pub fn find_item(&self, item_code: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.item_code == item_code)
    }
}

/// An ordered list of categories, each code unique within the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vector<CatalogCategory>,
}

impl Catalog {
    /// Creates a catalog, rejecting blank or repeated category codes.
    pub fn new(
        categories: impl IntoIterator<Item = CatalogCategory>,
    ) -> Result<Self, DocumentError> {
        let mut catalog = Self::default();
        for category in categories {
            if category.code.trim().is_empty() {
                return Err(DocumentError::Required {
                    field: "categoryCode",
                });
            }
            if catalog.category_index(&category.code).is_some() {
                return Err(DocumentError::DuplicateCategoryCode {
                    code: category.code,
                });
            }
            catalog.categories.push_back(category);
        }
        Ok(catalog)
    }

    // Query methods

    pub fn categories(&self) -> &Vector<CatalogCategory> {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn find_category(&self, code: &str) -> Option<&CatalogCategory> {
        self.categories.iter().find(|c| c.code == code)
    }

    pub fn category_index(&self, code: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.code == code)
    }

    fn require_category(&self, code: &str) -> Result<usize, DocumentError> {
        if code.trim().is_empty() {
            return Err(DocumentError::Required {
                field: "categoryCode",
            });
        }
        self.category_index(code)
            .ok_or_else(|| DocumentError::HandyCategoryNotFound {
                code: code.to_string(),
            })
    }

    fn with_category_at(&self, index: usize, category: CatalogCategory) -> Self {
        let mut categories = self.categories.clone();
        categories.set(index, category);
        Self { categories }
    }

    // Category edits

    pub fn insert_category(&self, index: usize, category: CatalogCategory) -> Result<Self, DocumentError> {
        check_index("categoryIndex", index, self.len() + 1)?;
        if category.code.trim().is_empty() {
            return Err(DocumentError::Required {
                field: "categoryCode",
            });
        }
        if self.find_category(&category.code).is_some() {
            return Err(DocumentError::DuplicateHandyCategory {
                code: category.code,
            });
        }
        let mut categories = self.categories.clone();
        categories.insert(index, category);
        Ok(Self { categories })
    }

    /// Removes the category at `index` after checking it still carries
    /// `expected_code`.
    pub fn remove_category(&self, index: usize, expected_code: &str) -> Result<Self, DocumentError> {
        check_index("categoryIndex", index, self.len())?;
        let actual = &self.categories[index].code;
        if actual != expected_code {
            return Err(DocumentError::SnapshotMismatch {
                what: "handy category",
                expected: expected_code.to_string(),
                actual: actual.clone(),
            });
        }
        let mut categories = self.categories.clone();
        categories.remove(index);
        Ok(Self { categories })
    }

    pub fn move_category(&self, from: usize, to: usize) -> Result<Self, DocumentError> {
        check_index("fromIndex", from, self.len())?;
        check_index("toIndex", to, self.len())?;
        Ok(Self {
            categories: moved(&self.categories, from, to),
        })
    }

    pub fn swap_categories(&self, from_code: &str, to_code: &str) -> Result<Self, DocumentError> {
        let from = self.require_category(from_code)?;
        let to = self.require_category(to_code)?;
        let mut categories = self.categories.clone();
        categories.swap(from, to);
        Ok(Self { categories })
    }

    // Item edits

    pub fn insert_item(&self, code: &str, index: usize, item: CatalogItem) -> Result<Self, DocumentError> {
        let position = self.require_category(code)?;
        let category = &self.categories[position];
        check_index("itemIndex", index, category.items.len() + 1)?;
        let mut updated = category.clone();
        updated.items.insert(index, item);
        Ok(self.with_category_at(position, updated))
    }

    pub fn remove_item(&self, code: &str, index: usize) -> Result<Self, DocumentError> {
        let position = self.require_category(code)?;
        let category = &self.categories[position];
        check_index("itemIndex", index, category.items.len())?;
        let mut updated = category.clone();
        updated.items.remove(index);
        Ok(self.with_category_at(position, updated))
    }

    pub fn move_item(&self, code: &str, from: usize, to: usize) -> Result<Self, DocumentError> {
        let position = self.require_category(code)?;
        let category = &self.categories[position];
        check_index("fromIndex", from, category.items.len())?;
        check_index("toIndex", to, category.items.len())?;
        let updated = CatalogCategory {
            items: moved(&category.items, from, to),
            ..category.clone()
        };
        Ok(self.with_category_at(position, updated))
    }

    /// Rewrites every item whose code is `from_code`. Returns an equal
    /// catalog when nothing matches.
    pub fn rewrite_item(&self, from_code: &str, to: &CatalogItem) -> Self {
        let mut categories = self.categories.clone();
        for (index, category) in self.categories.iter().enumerate() {
            if !category.items.iter().any(|i| i.item_code == from_code) {
                continue;
            }
            let items = category
                .items
                .iter()
                .map(|i| if i.item_code == from_code { to.clone() } else { i.clone() })
                .collect();
            categories.set(
                index,
                CatalogCategory {
                    items,
                    ..category.clone()
                },
            );
        }
        Self { categories }
    }
}

fn check_index(field: &'static str, index: usize, len: usize) -> Result<(), DocumentError> {
    if index < len {
        Ok(())
    } else {
        Err(DocumentError::IndexOutOfRange { field, index, len })
    }
}

fn moved<T: Clone>(values: &Vector<T>, from: usize, to: usize) -> Vector<T> {
    let mut values = values.clone();
    if from != to {
        let value = values.remove(from);
        values.insert(to, value);
    }
    values
}
