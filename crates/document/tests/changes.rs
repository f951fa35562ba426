//! Integration tests for applying changes to documents.

use common::ButtonId;
use document::{
    AddButton, AddCategory, AddHandyCategory, AddHandyItem, Button, Catalog, CatalogCategory,
    CatalogItem, CatalogKind, Change, ConfigSeed, DeleteButton, DeleteCategory,
    DeleteHandyCategory, DeleteHandyItem, Document, DocumentError, ErrorKind, GridCategory,
    ItemMasterCatalog, MasterItem, PageButton, PosConfig, ReorderHandyCategories,
    ReorderHandyItems, SwapButtons, SwapCategories, SwapHandyCategories, UpdateCategoryGrid,
    UpdateItemMasterItem, UpdateUnitPrice,
};

fn button(col: u32, row: u32, id: &str, item_code: &str, price: &str) -> Button {
    Button::new(col, row, format!("label-{id}"), 1, item_code, price, ButtonId::new(id)).unwrap()
}

fn config() -> PosConfig {
    PosConfig::from_source(ConfigSeed {
        categories: vec![
            GridCategory::new(1, 3, 2, "Food", 1).unwrap(),
            GridCategory::new(2, 4, 4, "Drinks", 2).unwrap(),
        ],
        page_buttons: vec![
            PageButton {
                page_number: 1,
                button: button(3, 2, "b1", "1001", "300"),
            },
            PageButton {
                page_number: 1,
                button: button(1, 1, "b2", "1003", "250"),
            },
            PageButton {
                page_number: 2,
                button: button(2, 2, "b3", "1001", "300"),
            },
        ],
    })
    .unwrap()
}

fn item_catalog() -> Catalog {
    Catalog::new(vec![
        CatalogCategory::new(
            "S1",
            "Source",
            vec![
                CatalogItem::new("A", "Apple", "100"),
                CatalogItem::new("B", "Banana", "120"),
                CatalogItem::new("C", "Cherry", "140"),
                CatalogItem::new("1001", "Coffee", "300"),
            ],
        ),
        CatalogCategory::new("S2", "Other", vec![CatalogItem::new("1003", "Tea", "250")]),
    ])
    .unwrap()
}

fn handy_catalog() -> Catalog {
    Catalog::new(vec![
        CatalogCategory::new(
            "10",
            "Fruit",
            vec![
                CatalogItem::new("A", "Apple", "100"),
                CatalogItem::new("C", "Cherry", "140"),
            ],
        ),
        CatalogCategory::new(
            "11",
            "Hot",
            vec![
                CatalogItem::new("1001", "Coffee", "300"),
                CatalogItem::new("1001", "Coffee", "300"),
            ],
        ),
        CatalogCategory::new("12", "Cold", vec![]),
    ])
    .unwrap()
}

fn master() -> ItemMasterCatalog {
    ItemMasterCatalog::new(vec![
        MasterItem::new("1001", "Coffee", "300", "100", ""),
        MasterItem::new("1003", "Tea", "250", "80", ""),
    ])
    .unwrap()
}

fn full_document() -> Document {
    Document::with_catalogs(
        config(),
        Some(item_catalog()),
        Some(handy_catalog()),
        Some(master()),
    )
}

fn handy_codes(doc: &Document) -> Vec<String> {
    doc.handy_catalog()
        .unwrap()
        .categories()
        .iter()
        .map(|c| c.code.clone())
        .collect()
}

fn handy_items(doc: &Document, code: &str) -> Vec<String> {
    doc.handy_catalog()
        .unwrap()
        .find_category(code)
        .unwrap()
        .items
        .iter()
        .map(|i| i.item_code.clone())
        .collect()
}

mod grid_changes {
    use super::*;

    #[test]
    fn add_and_delete_button() {
        let doc = full_document();
        let new_button = button(2, 1, "new-1", "1003", "250");
        let added = Change::from(AddButton::new(1, new_button.clone()))
            .apply(&doc)
            .unwrap();
        assert_eq!(added.config().page(1).unwrap().button_at(2, 1), Some(&new_button));

        let deleted = Change::from(DeleteButton::new(1, ButtonId::new("new-1")).unwrap())
            .apply(&added)
            .unwrap();
        assert_eq!(deleted, doc);
    }

    #[test]
    fn add_button_to_missing_page_is_not_found() {
        let err = Change::from(AddButton::new(9, button(1, 1, "x", "1", "1")))
            .apply(&full_document())
            .unwrap_err();
        assert_eq!(err, DocumentError::PageNotFound { page_number: 9 });
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn delete_unknown_button_is_not_found() {
        let err = Change::from(DeleteButton::new(1, ButtonId::new("ghost")).unwrap())
            .apply(&full_document())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(DeleteButton::new(1, ButtonId::new(" ")).is_err());
    }

    #[test]
    fn swap_to_outside_cell_is_rejected() {
        let err = Change::from(SwapButtons::new(1, 1, 1, 4, 1))
            .apply(&full_document())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn swap_from_outside_cell_onto_a_button_is_rejected() {
        let doc = full_document();
        let err = Change::from(SwapButtons::new(1, 9, 9, 1, 1))
            .apply(&doc)
            .unwrap_err();
        assert_eq!(
            err,
            DocumentError::CellOutOfBounds {
                col: 9,
                row: 9,
                cols: 3,
                rows: 2
            }
        );
        let page = doc.config().page(1).unwrap();
        assert!(page.buttons().iter().all(|b| page.contains_cell(b.col, b.row)));
    }

    #[test]
    fn add_category_uses_next_page_number() {
        let doc = full_document();
        let added = Change::from(AddCategory::new("Dessert", 5, 4, 3).unwrap())
            .apply(&doc)
            .unwrap();
        let category = added.config().category(3).unwrap();
        assert_eq!(category.name, "Dessert");
        let page = added.config().page(3).unwrap();
        assert_eq!((page.cols(), page.rows()), (5, 4));
        assert!(page.buttons().is_empty());

        let empty = Document::new(PosConfig::default());
        let first = Change::from(AddCategory::new("Only", 2, 2, 1).unwrap())
            .apply(&empty)
            .unwrap();
        assert!(first.config().category(1).is_some());
    }

    #[test]
    fn delete_category_drops_its_page() {
        let deleted = Change::from(DeleteCategory::new(2))
            .apply(&full_document())
            .unwrap();
        assert!(deleted.config().category(2).is_none());
        assert!(deleted.config().page(2).is_none());
        assert_eq!(deleted.config().categories().len(), 1);
    }

    #[test]
    fn swap_categories_moves_metadata_with_contents() {
        let swapped = Change::from(SwapCategories::new(1, 2))
            .apply(&full_document())
            .unwrap();
        let config = swapped.config();
        assert_eq!(config.category(1).unwrap().name, "Drinks");
        assert_eq!(config.page(1).unwrap().cols(), 4);
        assert!(config.page(1).unwrap().find_button(&ButtonId::new("b3")).is_some());
        assert_eq!(config.category(2).unwrap().name, "Food");
        assert!(config.page(2).unwrap().find_button(&ButtonId::new("b1")).is_some());
    }

    #[test]
    fn grid_shrink_with_button_outside_is_rejected_atomically() {
        let doc = full_document();
        let change = Change::from(UpdateCategoryGrid::new(1, 3, 2, 2, 2).unwrap());

        let err = change.apply(&doc).unwrap_err();
        assert_eq!(err.to_string(), "button out of range for resized grid: (3,2)");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let category = doc.config().category(1).unwrap();
        assert_eq!((category.cols, category.rows), (3, 2));
        assert_eq!(doc.config().page(1).unwrap().buttons().len(), 2);
    }

    #[test]
    fn grid_grow_resizes_category_and_page() {
        let grown = Change::from(UpdateCategoryGrid::new(1, 3, 2, 6, 5).unwrap())
            .apply(&full_document())
            .unwrap();
        let category = grown.config().category(1).unwrap();
        let page = grown.config().page(1).unwrap();
        assert_eq!((category.cols, category.rows), (6, 5));
        assert_eq!((page.cols(), page.rows()), (6, 5));
        assert!(UpdateCategoryGrid::new(1, 3, 2, 0, 5).is_err());
    }

    #[test]
    fn update_unit_price_normalises_and_records_old_value() {
        let change = UpdateUnitPrice::new(1, ButtonId::new("b1"), "300", " 1,250 ").unwrap();
        assert_eq!(change.old_unit_price, "300");
        assert_eq!(change.new_unit_price, "1250");

        let updated = Change::from(change).apply(&full_document()).unwrap();
        let b1 = updated.config().page(1).unwrap().find_button(&ButtonId::new("b1")).unwrap();
        assert_eq!(b1.unit_price, "1250");

        let err = UpdateUnitPrice::new(1, ButtonId::new("b1"), "300", "free").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

mod handy_changes {
    use super::*;

    #[test]
    fn handy_changes_require_the_catalog() {
        let doc = Document::new(config());
        let err = Change::from(ReorderHandyCategories::new(0, 1))
            .apply(&doc)
            .unwrap_err();
        assert_eq!(
            err,
            DocumentError::CatalogNotLoaded {
                kind: CatalogKind::Handy
            }
        );
        assert_eq!(err.kind(), ErrorKind::IllegalState);
    }

    #[test]
    fn add_and_delete_handy_category() {
        let doc = full_document();
        let category = CatalogCategory::new("13", "Snacks", vec![]);
        let added = Change::from(AddHandyCategory::new(3, category.clone()).unwrap())
            .apply(&doc)
            .unwrap();
        assert_eq!(handy_codes(&added), vec!["10", "11", "12", "13"]);

        let duplicate = Change::from(AddHandyCategory::new(0, category.clone()).unwrap())
            .apply(&added)
            .unwrap_err();
        assert_eq!(duplicate.to_string(), "handy category already exists: 13");

        let deleted = Change::from(DeleteHandyCategory::new(3, category))
            .apply(&added)
            .unwrap();
        assert_eq!(deleted, doc);
    }

    #[test]
    fn delete_handy_category_detects_stale_snapshot() {
        let stale = CatalogCategory::new("12", "Cold", vec![]);
        let err = Change::from(DeleteHandyCategory::new(0, stale))
            .apply(&full_document())
            .unwrap_err();
        assert!(matches!(err, DocumentError::SnapshotMismatch { .. }));
    }

    #[test]
    fn reorder_and_swap_handy_categories() {
        let doc = full_document();
        let reordered = Change::from(ReorderHandyCategories::new(2, 0))
            .apply(&doc)
            .unwrap();
        assert_eq!(handy_codes(&reordered), vec!["12", "10", "11"]);

        let same = Change::from(ReorderHandyCategories::new(1, 1))
            .apply(&doc)
            .unwrap();
        assert_eq!(same, doc);

        let swapped = Change::from(SwapHandyCategories::new("10", "12").unwrap())
            .apply(&doc)
            .unwrap();
        assert_eq!(handy_codes(&swapped), vec!["12", "11", "10"]);

        let err = Change::from(ReorderHandyCategories::new(0, 3))
            .apply(&doc)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn handy_item_insertion_preserves_source_order() {
        let doc = full_document();
        let source = doc.item_catalog().unwrap().find_category("S1").unwrap();
        let handy = doc.handy_catalog().unwrap().find_category("10").unwrap();

        let change = AddHandyItem::from_source(handy, source, "B").unwrap();
        assert_eq!(change.insert_index, 1);

        let added = Change::from(change).apply(&doc).unwrap();
        assert_eq!(handy_items(&added, "10"), vec!["A", "B", "C"]);
    }

    #[test]
    fn duplicate_handy_items_are_allowed() {
        let doc = full_document();
        let change = AddHandyItem::new("11", 0, CatalogItem::new("1001", "Coffee", "300")).unwrap();
        let added = Change::from(change).apply(&doc).unwrap();
        assert_eq!(handy_items(&added, "11"), vec!["1001", "1001", "1001"]);
    }

    #[test]
    fn delete_and_reorder_handy_items() {
        let doc = full_document();
        let deleted = Change::from(
            DeleteHandyItem::new("10", 0, CatalogItem::new("A", "Apple", "100")).unwrap(),
        )
        .apply(&doc)
        .unwrap();
        assert_eq!(handy_items(&deleted, "10"), vec!["C"]);

        let reordered = Change::from(ReorderHandyItems::new("10", 1, 0).unwrap())
            .apply(&doc)
            .unwrap();
        assert_eq!(handy_items(&reordered, "10"), vec!["C", "A"]);

        let err = Change::from(ReorderHandyItems::new("99", 0, 0).unwrap())
            .apply(&doc)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

mod item_master_changes {
    use super::*;

    fn rename_coffee() -> Change {
        let before = master().find_item("1001").unwrap().clone();
        let after = MasterItem::new("1002", "Iced Coffee", "350", "100", "");
        UpdateItemMasterItem::new(before, after).unwrap().into()
    }

    #[test]
    fn rename_cascades_to_catalogs_and_buttons() {
        let updated = rename_coffee().apply(&full_document()).unwrap();

        let master = updated.item_master_catalog().unwrap();
        assert!(master.find_item("1001").is_none());
        assert_eq!(master.find_item("1002").unwrap().item_name_print, "Iced Coffee");

        let pos_item = updated
            .item_catalog()
            .unwrap()
            .find_category("S1")
            .unwrap()
            .find_item("1002")
            .unwrap();
        assert_eq!(pos_item, &CatalogItem::new("1002", "Iced Coffee", "350"));
        assert_eq!(handy_items(&updated, "11"), vec!["1002", "1002"]);

        let config = updated.config();
        let b1 = config.page(1).unwrap().find_button(&ButtonId::new("b1")).unwrap();
        assert_eq!((b1.item_code.as_str(), b1.unit_price.as_str()), ("1002", "350"));
        assert_eq!(b1.label, "label-b1");
        let b3 = config.page(2).unwrap().find_button(&ButtonId::new("b3")).unwrap();
        assert_eq!(b3.item_code, "1002");

        let b2 = config.page(1).unwrap().find_button(&ButtonId::new("b2")).unwrap();
        assert_eq!((b2.item_code.as_str(), b2.unit_price.as_str()), ("1003", "250"));
        let tea = updated.item_catalog().unwrap().find_category("S2").unwrap();
        assert_eq!(tea.items[0], CatalogItem::new("1003", "Tea", "250"));
    }

    #[test]
    fn rename_onto_existing_code_changes_nothing() {
        let doc = full_document();
        let before = master().find_item("1001").unwrap().clone();
        let after = MasterItem::new("1003", "Coffee", "300", "", "");
        let err = Change::from(UpdateItemMasterItem::new(before, after).unwrap())
            .apply(&doc)
            .unwrap_err();
        assert_eq!(
            err,
            DocumentError::DuplicateItemCode {
                item_code: "1003".to_string()
            }
        );
        assert_eq!(doc, full_document());
    }

    #[test]
    fn resaving_an_entry_resyncs_linked_buttons_and_items() {
        let doc = full_document();
        let before = master().find_item("1001").unwrap().clone();
        let resave = Change::from(UpdateItemMasterItem::new(before.clone(), before).unwrap());

        assert_eq!(resave.apply(&doc).unwrap(), doc);

        let stale = Change::from(
            UpdateUnitPrice::new(1, ButtonId::new("b1"), "300".to_string(), "999").unwrap(),
        )
        .apply(&doc)
        .unwrap();
        let resynced = resave.apply(&stale).unwrap();
        let b1 = resynced.config().page(1).unwrap().find_button(&ButtonId::new("b1")).unwrap();
        assert_eq!(b1.unit_price, "300");
        assert_eq!(resynced, doc);
    }

    #[test]
    fn absent_catalogs_are_skipped() {
        let doc = Document::with_catalogs(config(), None, None, Some(master()));
        let updated = rename_coffee().apply(&doc).unwrap();
        assert!(updated.item_catalog().is_none());
        assert!(updated.handy_catalog().is_none());
        assert_eq!(
            updated.config().page(1).unwrap().find_button(&ButtonId::new("b1")).unwrap().item_code,
            "1002"
        );
    }

    #[test]
    fn item_master_must_be_loaded() {
        let doc = Document::new(config());
        let err = rename_coffee().apply(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalState);
    }

    #[test]
    fn constructor_validates_the_new_values() {
        let before = master().find_item("1001").unwrap().clone();
        let blank_name = MasterItem::new("1001", " ", "300", "", "");
        assert_eq!(
            UpdateItemMasterItem::new(before.clone(), blank_name).unwrap_err(),
            DocumentError::Required {
                field: "itemNamePrint"
            }
        );
        let bad_cost = MasterItem::new("1001", "Coffee", "300", "cheap", "");
        assert!(UpdateItemMasterItem::new(before.clone(), bad_cost).is_err());

        let normalised = UpdateItemMasterItem::new(
            before,
            MasterItem::new(" 1001 ", "Coffee", "1,300", "", ""),
        )
        .unwrap();
        assert_eq!(normalised.after.item_code, "1001");
        assert_eq!(normalised.after.unit_price, "1300");
    }
}
