//! POS grid layout: categories, their pages, and the buttons placed on them.
//!
//! Every type here is an immutable value. Edits return a new [`PosConfig`]
//! sharing all untouched structure with the original.

use common::ButtonId;
use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// A button placed on one cell of a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Button {
    /// 1-based column.
    pub col: u32,

    /// 1-based row.
    pub row: u32,

    pub label: String,
    pub style_key: u32,
    pub item_code: String,
    pub unit_price: String,

    /// Stable identity, independent of position.
    pub button_id: ButtonId,
}

impl Button {
    /// Creates a button, rejecting a blank id or a position outside the
    /// 1-based grid coordinate space.
    pub fn new(
        col: u32,
        row: u32,
        label: impl Into<String>,
        style_key: u32,
        item_code: impl Into<String>,
        unit_price: impl Into<String>,
        button_id: ButtonId,
    ) -> Result<Self, DocumentError> {
        if button_id.is_blank() {
            return Err(DocumentError::Required { field: "buttonId" });
        }
        if col == 0 || row == 0 {
            return Err(DocumentError::InvalidPosition { col, row });
        }
        Ok(Self {
            col,
            row,
            label: label.into(),
            style_key,
            item_code: item_code.into(),
            unit_price: unit_price.into(),
            button_id,
        })
    }

    /// Returns a copy of this button moved to another cell.
    pub fn with_position(&self, col: u32, row: u32) -> Self {
        Self {
            col,
            row,
            ..self.clone()
        }
    }

    /// Returns true if the button occupies the given cell.
    pub fn is_at(&self, col: u32, row: u32) -> bool {
        self.col == col && self.row == row
    }
}

/// Metadata of one POS category. The page number is its unique key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCategory {
    pub page_number: u32,
    pub cols: u32,
    pub rows: u32,
    pub name: String,
    pub style_key: u32,
}

impl GridCategory {
    /// Creates a category, rejecting page number `0` and empty grids. A blank
    /// name is allowed.
    pub fn new(
        page_number: u32,
        cols: u32,
        rows: u32,
        name: impl Into<String>,
        style_key: u32,
    ) -> Result<Self, DocumentError> {
        if page_number == 0 {
            return Err(DocumentError::InvalidPageNumber { page_number });
        }
        if cols == 0 || rows == 0 {
            return Err(DocumentError::InvalidGridSize { cols, rows });
        }
        Ok(Self {
            page_number,
            cols,
            rows,
            name: name.into(),
            style_key,
        })
    }
}

/// The button grid of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    page_number: u32,
    cols: u32,
    rows: u32,
    buttons: Vector<Button>,
}

impl Page {
    /// Creates a page, checking that every button lies inside the grid and
    /// that no two buttons share a cell.
    pub fn new(
        page_number: u32,
        cols: u32,
        rows: u32,
        buttons: impl IntoIterator<Item = Button>,
    ) -> Result<Self, DocumentError> {
        if cols == 0 || rows == 0 {
            return Err(DocumentError::InvalidGridSize { cols, rows });
        }
        let mut page = Self {
            page_number,
            cols,
            rows,
            buttons: Vector::new(),
        };
        for button in buttons {
            page.check_placement(&button)?;
            page.buttons.push_back(button);
        }
        Ok(page)
    }

    /// Creates a page without buttons.
    pub fn empty(page_number: u32, cols: u32, rows: u32) -> Result<Self, DocumentError> {
        Self::new(page_number, cols, rows, std::iter::empty())
    }

    // Query methods

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn buttons(&self) -> &Vector<Button> {
        &self.buttons
    }

    /// Returns the button occupying a cell, if any.
    pub fn button_at(&self, col: u32, row: u32) -> Option<&Button> {
        self.buttons.iter().find(|b| b.is_at(col, row))
    }

    pub fn find_button(&self, button_id: &ButtonId) -> Option<&Button> {
        self.buttons.iter().find(|b| &b.button_id == button_id)
    }

    /// Returns the first button, in page order, that lies outside a
    /// `cols` x `rows` grid.
    pub fn first_outside(&self, cols: u32, rows: u32) -> Option<&Button> {
        self.buttons.iter().find(|b| b.col > cols || b.row > rows)
    }

    pub fn contains_cell(&self, col: u32, row: u32) -> bool {
        (1..=self.cols).contains(&col) && (1..=self.rows).contains(&row)
    }

    fn check_placement(&self, button: &Button) -> Result<(), DocumentError> {
        if !self.contains_cell(button.col, button.row) {
            return Err(DocumentError::CellOutOfBounds {
                col: button.col,
                row: button.row,
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.button_at(button.col, button.row).is_some() {
            return Err(DocumentError::CellOccupied {
                col: button.col,
                row: button.row,
            });
        }
        Ok(())
    }

    fn position_of(&self, button_id: &ButtonId) -> Option<usize> {
        self.buttons.iter().position(|b| &b.button_id == button_id)
    }

    // Edits

    fn with_button(&self, button: Button) -> Result<Self, DocumentError> {
        self.check_placement(&button)?;
        let mut page = self.clone();
        page.buttons.push_back(button);
        Ok(page)
    }

    fn without_button(&self, button_id: &ButtonId) -> Result<Self, DocumentError> {
        let index = self
            .position_of(button_id)
            .ok_or_else(|| DocumentError::ButtonNotFound {
                button_id: button_id.clone(),
            })?;
        let mut page = self.clone();
        page.buttons.remove(index);
        Ok(page)
    }

    fn with_swapped(&self, from: (u32, u32), to: (u32, u32)) -> Result<Self, DocumentError> {
        if from == to {
            return Ok(self.clone());
        }
        for (col, row) in [from, to] {
            if !self.contains_cell(col, row) {
                return Err(DocumentError::CellOutOfBounds {
                    col,
                    row,
                    cols: self.cols,
                    rows: self.rows,
                });
            }
        }

        let from_index = self.buttons.iter().position(|b| b.is_at(from.0, from.1));
        let to_index = self.buttons.iter().position(|b| b.is_at(to.0, to.1));

        let mut page = self.clone();
        match (from_index, to_index) {
            (None, None) => {}
            (Some(i), None) => {
                page.buttons.set(i, self.buttons[i].with_position(to.0, to.1));
            }
            (None, Some(j)) => {
                page.buttons.set(j, self.buttons[j].with_position(from.0, from.1));
            }
            (Some(i), Some(j)) => {
                page.buttons.set(i, self.buttons[j].with_position(from.0, from.1));
                page.buttons.set(j, self.buttons[i].with_position(to.0, to.1));
            }
        }
        Ok(page)
    }

    fn resized(&self, cols: u32, rows: u32) -> Result<Self, DocumentError> {
        if cols == 0 || rows == 0 {
            return Err(DocumentError::InvalidGridSize { cols, rows });
        }
        if let Some(button) = self.first_outside(cols, rows) {
            return Err(DocumentError::ButtonOutOfRange {
                col: button.col,
                row: button.row,
            });
        }
        Ok(Self {
            cols,
            rows,
            ..self.clone()
        })
    }

    fn with_unit_price(&self, button_id: &ButtonId, unit_price: &str) -> Result<Self, DocumentError> {
        let index = self
            .position_of(button_id)
            .ok_or_else(|| DocumentError::ButtonNotFound {
                button_id: button_id.clone(),
            })?;
        let mut page = self.clone();
        let mut button = self.buttons[index].clone();
        button.unit_price = unit_price.to_string();
        page.buttons.set(index, button);
        Ok(page)
    }

    /// Rewrites item code and price of every button linked to `from_code`.
    /// Returns `None` when no button matched.
    fn with_item_rewritten(&self, from_code: &str, to_code: &str, to_unit_price: &str) -> Option<Self> {
        let mut changed = false;
        let buttons = self
            .buttons
            .iter()
            .map(|b| {
                if b.item_code == from_code {
                    changed = true;
                    Button {
                        item_code: to_code.to_string(),
                        unit_price: to_unit_price.to_string(),
                        ..b.clone()
                    }
                } else {
                    b.clone()
                }
            })
            .collect();
        changed.then(|| Self {
            buttons,
            ..self.clone()
        })
    }
}

/// One button of the seed data, tagged with the page it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageButton {
    pub page_number: u32,
    pub button: Button,
}

/// Flat configuration data as read from the original source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSeed {
    pub categories: Vec<GridCategory>,
    pub page_buttons: Vec<PageButton>,
}

/// The whole POS grid: ordered categories plus one page per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosConfig {
    categories: Vector<GridCategory>,
    pages: OrdMap<u32, Page>,
}

impl PosConfig {
    /// Creates a config, checking that every category has exactly one page
    /// of matching dimensions and that category page numbers are unique.
    pub fn new(
        categories: impl IntoIterator<Item = GridCategory>,
        pages: impl IntoIterator<Item = Page>,
    ) -> Result<Self, DocumentError> {
        let categories: Vector<GridCategory> = categories.into_iter().collect();
        let pages: OrdMap<u32, Page> = pages.into_iter().map(|p| (p.page_number, p)).collect();

        for (i, category) in categories.iter().enumerate() {
            if categories
                .iter()
                .skip(i + 1)
                .any(|c| c.page_number == category.page_number)
            {
                return Err(DocumentError::PageMismatch {
                    page_number: category.page_number,
                });
            }
            match pages.get(&category.page_number) {
                Some(page) if page.cols == category.cols && page.rows == category.rows => {}
                _ => {
                    return Err(DocumentError::PageMismatch {
                        page_number: category.page_number,
                    });
                }
            }
        }
        if pages.len() != categories.len() {
            let orphan = pages
                .keys()
                .find(|n| !categories.iter().any(|c| c.page_number == **n))
                .copied()
                .unwrap_or_default();
            return Err(DocumentError::PageMismatch {
                page_number: orphan,
            });
        }

        Ok(Self { categories, pages })
    }

    /// Builds a config from seed data.
    ///
    /// Categories are ordered by page number and buttons are grouped onto the
    /// page of their page number. When two categories share a page number the
    /// first one wins.
    pub fn from_source(seed: ConfigSeed) -> Result<Self, DocumentError> {
        let mut categories = seed.categories;
        categories.sort_by_key(|c| c.page_number);
        categories.dedup_by_key(|c| c.page_number);

        let mut pages = Vec::with_capacity(categories.len());
        for category in &categories {
            let buttons = seed
                .page_buttons
                .iter()
                .filter(|pb| pb.page_number == category.page_number)
                .map(|pb| pb.button.clone());
            pages.push(Page::new(category.page_number, category.cols, category.rows, buttons)?);
        }

        Self::new(categories, pages)
    }

    // Query methods

    pub fn categories(&self) -> &Vector<GridCategory> {
        &self.categories
    }

    /// Returns the pages in page-number order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    pub fn page(&self, page_number: u32) -> Option<&Page> {
        self.pages.get(&page_number)
    }

    pub fn category(&self, page_number: u32) -> Option<&GridCategory> {
        self.categories.iter().find(|c| c.page_number == page_number)
    }

    pub fn first_category(&self) -> Option<&GridCategory> {
        self.categories.front()
    }

    /// Returns true if any page holds a button with this id.
    pub fn contains_button_id(&self, button_id: &ButtonId) -> bool {
        self.pages().any(|p| p.find_button(button_id).is_some())
    }

    /// Page number a newly added category receives.
    pub fn next_page_number(&self) -> u32 {
        self.categories
            .iter()
            .map(|c| c.page_number)
            .max()
            .map_or(1, |n| n + 1)
    }

    pub(crate) fn require_page(&self, page_number: u32) -> Result<&Page, DocumentError> {
        self.page(page_number)
            .ok_or(DocumentError::PageNotFound { page_number })
    }

    fn require_category_position(&self, page_number: u32) -> Result<usize, DocumentError> {
        self.categories
            .iter()
            .position(|c| c.page_number == page_number)
            .ok_or(DocumentError::CategoryNotFound { page_number })
    }

    fn with_page(&self, page: Page) -> Self {
        Self {
            categories: self.categories.clone(),
            pages: self.pages.update(page.page_number, page),
        }
    }

    // Edits

    pub fn add_button(&self, page_number: u32, button: Button) -> Result<Self, DocumentError> {
        let page = self.require_page(page_number)?;
        if button.button_id.is_blank() {
            return Err(DocumentError::Required { field: "buttonId" });
        }
        if self.contains_button_id(&button.button_id) {
            return Err(DocumentError::DuplicateButtonId {
                button_id: button.button_id,
            });
        }
        Ok(self.with_page(page.with_button(button)?))
    }

    pub fn delete_button(&self, page_number: u32, button_id: &ButtonId) -> Result<Self, DocumentError> {
        let page = self.require_page(page_number)?;
        Ok(self.with_page(page.without_button(button_id)?))
    }

    /// Exchanges the contents of two cells. An empty cell on either side
    /// turns the swap into a move; two empty cells leave the page unchanged.
    pub fn swap_buttons(
        &self,
        page_number: u32,
        from: (u32, u32),
        to: (u32, u32),
    ) -> Result<Self, DocumentError> {
        let page = self.require_page(page_number)?;
        Ok(self.with_page(page.with_swapped(from, to)?))
    }

    pub fn update_unit_price(
        &self,
        page_number: u32,
        button_id: &ButtonId,
        unit_price: &str,
    ) -> Result<Self, DocumentError> {
        let page = self.require_page(page_number)?;
        Ok(self.with_page(page.with_unit_price(button_id, unit_price)?))
    }

    /// Appends a category at [`PosConfig::next_page_number`] together with an
    /// empty page of the same size.
    pub fn add_category(
        &self,
        name: &str,
        cols: u32,
        rows: u32,
        style_key: u32,
    ) -> Result<Self, DocumentError> {
        let page_number = self.next_page_number();
        let page = Page::empty(page_number, cols, rows)?;
        let mut categories = self.categories.clone();
        categories.push_back(GridCategory::new(page_number, cols, rows, name, style_key)?);
        Ok(Self {
            categories,
            pages: self.pages.update(page_number, page),
        })
    }

    pub fn delete_category(&self, page_number: u32) -> Result<Self, DocumentError> {
        let position = self.require_category_position(page_number)?;
        let mut categories = self.categories.clone();
        categories.remove(position);
        Ok(Self {
            categories,
            pages: self.pages.without(&page_number),
        })
    }

    /// Exchanges category metadata and page contents between two page
    /// numbers. The page numbers themselves and the category order stay put.
    pub fn swap_categories(&self, from_page: u32, to_page: u32) -> Result<Self, DocumentError> {
        let from_position = self.require_category_position(from_page)?;
        let to_position = self.require_category_position(to_page)?;
        if from_page == to_page {
            return Ok(self.clone());
        }
        let from_source = self.require_page(from_page)?;
        let to_source = self.require_page(to_page)?;

        let from_category = &self.categories[from_position];
        let to_category = &self.categories[to_position];

        let mut categories = self.categories.clone();
        categories.set(
            from_position,
            GridCategory {
                page_number: from_page,
                ..to_category.clone()
            },
        );
        categories.set(
            to_position,
            GridCategory {
                page_number: to_page,
                ..from_category.clone()
            },
        );

        let pages = self
            .pages
            .update(
                from_page,
                Page {
                    page_number: from_page,
                    ..to_source.clone()
                },
            )
            .update(
                to_page,
                Page {
                    page_number: to_page,
                    ..from_source.clone()
                },
            );

        Ok(Self { categories, pages })
    }

    /// Resizes a category and its page together. Fails without touching
    /// anything if a button would fall outside the new bounds.
    pub fn resize_category(&self, page_number: u32, cols: u32, rows: u32) -> Result<Self, DocumentError> {
        let position = self.require_category_position(page_number)?;
        let page = self.require_page(page_number)?.resized(cols, rows)?;

        let mut categories = self.categories.clone();
        categories.set(
            position,
            GridCategory {
                cols,
                rows,
                ..self.categories[position].clone()
            },
        );
        Ok(Self {
            categories,
            pages: self.pages.update(page_number, page),
        })
    }

    /// Points every button linked to `from_code` at `to_code` with the new
    /// price. Labels are left alone.
    pub fn rewrite_item(&self, from_code: &str, to_code: &str, to_unit_price: &str) -> Self {
        let mut pages = self.pages.clone();
        for page in self.pages.values() {
            if let Some(rewritten) = page.with_item_rewritten(from_code, to_code, to_unit_price) {
                pages.insert(page.page_number, rewritten);
            }
        }
        Self {
            categories: self.categories.clone(),
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(col: u32, row: u32, id: &str, item: &str) -> Button {
        Button::new(col, row, format!("label {id}"), 1, item, "100", ButtonId::new(id)).unwrap()
    }

    fn two_page_config() -> PosConfig {
        PosConfig::from_source(ConfigSeed {
            categories: vec![
                GridCategory::new(2, 4, 4, "Drinks", 2).unwrap(),
                GridCategory::new(1, 3, 2, "Food", 1).unwrap(),
            ],
            page_buttons: vec![
                PageButton {
                    page_number: 1,
                    button: button(3, 2, "b1", "1001"),
                },
                PageButton {
                    page_number: 1,
                    button: button(1, 1, "b2", "1002"),
                },
                PageButton {
                    page_number: 2,
                    button: button(4, 4, "b3", "1001"),
                },
            ],
        })
        .unwrap()
    }

    #[test]
    fn from_source_sorts_categories_and_groups_buttons() {
        let config = two_page_config();
        let numbers: Vec<u32> = config.categories().iter().map(|c| c.page_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(config.page(1).unwrap().buttons().len(), 2);
        assert_eq!(config.page(2).unwrap().buttons().len(), 1);
        assert_eq!(config.next_page_number(), 3);
    }

    #[test]
    fn new_rejects_category_without_matching_page() {
        let result = PosConfig::new(
            vec![GridCategory::new(1, 3, 3, "A", 1).unwrap()],
            vec![Page::empty(1, 2, 3).unwrap()],
        );
        assert_eq!(result, Err(DocumentError::PageMismatch { page_number: 1 }));
    }

    #[test]
    fn page_rejects_overlapping_buttons() {
        let result = Page::new(1, 2, 2, vec![button(1, 1, "a", "x"), button(1, 1, "b", "y")]);
        assert_eq!(result, Err(DocumentError::CellOccupied { col: 1, row: 1 }));
    }

    #[test]
    fn add_button_checks_cell_and_identity() {
        let config = two_page_config();

        let occupied = config.add_button(1, button(1, 1, "new", "9"));
        assert_eq!(occupied, Err(DocumentError::CellOccupied { col: 1, row: 1 }));

        let outside = config.add_button(1, button(4, 1, "new", "9"));
        assert!(matches!(outside, Err(DocumentError::CellOutOfBounds { col: 4, .. })));

        let duplicate = config.add_button(1, button(2, 1, "b3", "9"));
        assert!(matches!(duplicate, Err(DocumentError::DuplicateButtonId { .. })));

        let added = config.add_button(1, button(2, 1, "new", "9")).unwrap();
        assert_eq!(added.page(1).unwrap().buttons().len(), 3);
        assert_eq!(config.page(1).unwrap().buttons().len(), 2);
    }

    #[test]
    fn swap_moves_into_empty_cell() {
        let config = two_page_config();
        let swapped = config.swap_buttons(1, (1, 1), (2, 2)).unwrap();
        let page = swapped.page(1).unwrap();
        assert!(page.button_at(1, 1).is_none());
        assert_eq!(page.button_at(2, 2).unwrap().button_id, ButtonId::new("b2"));
    }

    #[test]
    fn swap_exchanges_occupied_cells() {
        let config = two_page_config();
        let swapped = config.swap_buttons(1, (1, 1), (3, 2)).unwrap();
        let page = swapped.page(1).unwrap();
        assert_eq!(page.button_at(1, 1).unwrap().button_id, ButtonId::new("b1"));
        assert_eq!(page.button_at(3, 2).unwrap().button_id, ButtonId::new("b2"));
    }

    #[test]
    fn swap_of_two_empty_cells_is_unchanged() {
        let config = two_page_config();
        assert_eq!(config.swap_buttons(1, (2, 1), (2, 2)).unwrap(), config);
    }

    #[test]
    fn swap_categories_keeps_page_numbers() {
        let config = two_page_config();
        let swapped = config.swap_categories(1, 2).unwrap();

        let first = swapped.category(1).unwrap();
        assert_eq!(first.name, "Drinks");
        assert_eq!((first.cols, first.rows), (4, 4));
        let page = swapped.page(1).unwrap();
        assert_eq!(page.page_number(), 1);
        assert_eq!(page.buttons()[0].button_id, ButtonId::new("b3"));

        assert_eq!(swapped.category(2).unwrap().name, "Food");
        assert_eq!(swapped.page(2).unwrap().buttons().len(), 2);
    }

    #[test]
    fn rewrite_item_touches_only_matching_buttons() {
        let config = two_page_config();
        let rewritten = config.rewrite_item("1001", "2001", "250");
        let b1 = rewritten.page(1).unwrap().find_button(&ButtonId::new("b1")).unwrap();
        assert_eq!((b1.item_code.as_str(), b1.unit_price.as_str()), ("2001", "250"));
        assert_eq!(b1.label, "label b1");
        let b2 = rewritten.page(1).unwrap().find_button(&ButtonId::new("b2")).unwrap();
        assert_eq!(b2.item_code, "1002");
        let b3 = rewritten.page(2).unwrap().find_button(&ButtonId::new("b3")).unwrap();
        assert_eq!(b3.item_code, "2001");
    }

    #[test]
    fn button_position_is_one_based() {
        let err = Button::new(0, 2, "x", 1, "1", "100", ButtonId::new("z")).unwrap_err();
        assert_eq!(err, DocumentError::InvalidPosition { col: 0, row: 2 });
    }

    #[test]
    fn category_rejects_zero_page_and_empty_grid() {
        assert_eq!(
            GridCategory::new(0, 3, 3, "A", 1),
            Err(DocumentError::InvalidPageNumber { page_number: 0 })
        );
        assert_eq!(
            GridCategory::new(1, 0, 3, "A", 1),
            Err(DocumentError::InvalidGridSize { cols: 0, rows: 3 })
        );
        assert_eq!(GridCategory::new(1, 3, 3, " ", 1).unwrap().name, " ");
    }

    #[test]
    fn swap_from_outside_cell_is_rejected() {
        let config = two_page_config();
        let err = config.swap_buttons(1, (9, 9), (1, 1)).unwrap_err();
        assert_eq!(
            err,
            DocumentError::CellOutOfBounds {
                col: 9,
                row: 9,
                cols: 3,
                rows: 2
            }
        );
    }
}
