//! Draft service providing the use-case API over drafts.
//!
//! Each edit loads the draft, materializes the catalogs it needs, builds a
//! validated change, applies it under a descriptive label and saves the
//! result.

use std::sync::Arc;

use common::{ButtonId, DraftId};
use document::{
    AddButton, AddCategory, AddHandyCategory, AddHandyItem, Button, Catalog, CatalogCategory,
    Change, DeleteButton, DeleteCategory, DeleteHandyCategory, DeleteHandyItem, Document,
    DocumentError, ItemMasterCatalog, MasterItem, Page, PosConfig, ReorderHandyCategories,
    ReorderHandyItems, SwapButtons, SwapCategories, SwapHandyCategories, UpdateCategoryGrid,
    UpdateItemMasterItem, UpdateUnitPrice, validation,
};

use crate::config::DraftConfig;
use crate::draft::{Draft, HistorySummary};
use crate::error::{DraftError, HistoryError};
use crate::loader::CatalogLoader;
use crate::ports::{DraftStore, SourceExporter, SourceReader};

/// Smallest code given to an automatically numbered handy category.
const FIRST_HANDY_CATEGORY_CODE: u32 = 10;

const DEFAULT_GRID_COLS: u32 = 5;
const DEFAULT_GRID_ROWS: u32 = 5;
const DEFAULT_STYLE_KEY: u32 = 1;

/// Input for [`DraftService::update_item_master`], as typed by an operator.
#[derive(Debug, Clone, Default)]
pub struct UpdateItemMaster {
    /// Code of the entry being edited.
    pub current_code: String,
    pub item_code: String,
    pub item_name_print: String,
    pub unit_price: String,
    pub cost_price: String,
    pub base_price: String,
}

/// Service for editing drafts.
pub struct DraftService<R, S> {
    reader: Arc<R>,
    store: Arc<S>,
    exporter: Option<Arc<dyn SourceExporter>>,
    loader: CatalogLoader<R, S>,
    config: DraftConfig,
}

impl<R: SourceReader, S: DraftStore> DraftService<R, S> {
    /// Creates a service with default configuration.
    pub fn new(reader: R, store: S) -> Self {
        Self::with_config(reader, store, DraftConfig::default())
    }

    pub fn with_config(reader: R, store: S, config: DraftConfig) -> Self {
        let reader = Arc::new(reader);
        let store = Arc::new(store);
        Self {
            loader: CatalogLoader::new(Arc::clone(&reader), Arc::clone(&store)),
            reader,
            store,
            exporter: None,
            config,
        }
    }

    /// Enables [`DraftService::export`].
    pub fn with_exporter(mut self, exporter: impl SourceExporter + 'static) -> Self {
        self.exporter = Some(Arc::new(exporter));
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn loader(&self) -> &CatalogLoader<R, S> {
        &self.loader
    }

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    // Import and export

    /// Creates a draft from the original source bytes.
    ///
    /// The source is parsed once. With `eager_catalogs` the catalogs of that
    /// parse are kept in the initial document; otherwise they are derived on
    /// first use.
    #[tracing::instrument(skip(self, original_source), fields(size = original_source.len()))]
    pub async fn import(&self, original_source: Vec<u8>) -> Result<Draft, DraftError> {
        metrics::counter!("draft_source_reads_total").increment(1);
        let bundle = self.reader.read(&original_source)?;
        let config = PosConfig::from_source(bundle.seed)?;

        let document = if self.config.eager_catalogs {
            Document::with_catalogs(
                config,
                Some(bundle.item_catalog),
                Some(bundle.handy_catalog),
                Some(bundle.item_master_catalog),
            )
        } else {
            Document::new(config)
        };

        let draft = Draft::import(
            DraftId::new(),
            original_source,
            document,
            self.config.history_limit,
        );
        self.store.save(draft.clone()).await?;

        tracing::info!(draft_id = %draft.id(), "draft imported");
        Ok(draft)
    }

    /// Renders the current state back into the original format.
    #[tracing::instrument(skip(self))]
    pub async fn export(&self, draft_id: DraftId) -> Result<Vec<u8>, DraftError> {
        let exporter = self
            .exporter
            .as_ref()
            .ok_or_else(|| DraftError::IllegalState("no exporter configured".to_string()))?;
        let draft = self.require_draft(draft_id).await?;
        let document = draft.document();
        Ok(exporter.export(
            draft.original_source(),
            document.config(),
            document.handy_catalog(),
        )?)
    }

    // Reads

    #[tracing::instrument(skip(self))]
    pub async fn get_draft(&self, draft_id: DraftId) -> Result<Draft, DraftError> {
        self.require_draft(draft_id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_page(&self, draft_id: DraftId, page_number: u32) -> Result<Page, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        Ok(require_page(draft.document().config(), page_number)?.clone())
    }

    #[tracing::instrument(skip(self))]
    pub async fn item_catalog(&self, draft_id: DraftId) -> Result<Catalog, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        let (_, catalog) = self.loader.item_catalog(&draft).await?;
        Ok(catalog)
    }

    #[tracing::instrument(skip(self))]
    pub async fn handy_catalog(&self, draft_id: DraftId) -> Result<Catalog, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        let (_, catalog) = self.loader.handy_catalog(&draft).await?;
        Ok(catalog)
    }

    #[tracing::instrument(skip(self))]
    pub async fn item_master_catalog(
        &self,
        draft_id: DraftId,
    ) -> Result<ItemMasterCatalog, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        let (_, catalog) = self.loader.item_master_catalog(&draft).await?;
        Ok(catalog)
    }

    #[tracing::instrument(skip(self))]
    pub async fn history(&self, draft_id: DraftId) -> Result<HistorySummary, DraftError> {
        Ok(self.require_draft(draft_id).await?.history_summary())
    }

    // Grid edits

    /// Places an item from the item catalog on an empty cell.
    ///
    /// The label is the item name (or code), and the style follows the first
    /// button of the page, falling back to the category's style.
    #[tracing::instrument(skip(self))]
    pub async fn add_button(
        &self,
        draft_id: DraftId,
        page_number: u32,
        col: u32,
        row: u32,
        category_code: &str,
        item_code: &str,
    ) -> Result<Draft, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        let config = draft.document().config();
        let page = require_page(config, page_number)?;

        let (draft, catalog) = self.loader.item_catalog(&draft).await?;
        let category = catalog.find_category(category_code).ok_or_else(|| {
            DocumentError::CatalogCategoryNotFound {
                code: category_code.to_string(),
            }
        })?;
        let item = category
            .find_item(item_code)
            .ok_or_else(|| DocumentError::CatalogItemNotFound {
                category_code: category_code.to_string(),
                item_code: item_code.to_string(),
            })?;

        let style_key = page
            .buttons()
            .front()
            .map(|b| b.style_key)
            .or_else(|| config.category(page_number).map(|c| c.style_key))
            .unwrap_or(DEFAULT_STYLE_KEY);
        let label = item_display_name(&item.item_name, &item.item_code);
        let button = Button::new(
            col,
            row,
            label.clone(),
            style_key,
            item.item_code.clone(),
            item.unit_price.clone(),
            ButtonId::mint(),
        )?;

        let action = button_action("ボタン追加", &category_name(config, page_number), &label);
        self.commit(&draft, AddButton::new(page_number, button).into(), &action)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_button(
        &self,
        draft_id: DraftId,
        page_number: u32,
        button_id: &ButtonId,
    ) -> Result<Draft, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        let config = draft.document().config();
        let button = require_button(config, page_number, button_id)?;

        let name = display_text(&button.label, button.button_id.as_str());
        let action = button_action("ボタン削除", &category_name(config, page_number), name);
        let change = DeleteButton::new(page_number, button_id.clone())?;
        self.commit(&draft, change.into(), &action).await
    }

    /// Swaps or moves buttons between two cells of a page. Swapping a cell
    /// with itself, or two empty cells, leaves the draft as it is.
    #[tracing::instrument(skip(self))]
    pub async fn swap_buttons(
        &self,
        draft_id: DraftId,
        page_number: u32,
        from: (u32, u32),
        to: (u32, u32),
    ) -> Result<Draft, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        let page = require_page(draft.document().config(), page_number)?;
        if from == to
            || (page.button_at(from.0, from.1).is_none() && page.button_at(to.0, to.1).is_none())
        {
            return Ok(draft);
        }

        let change = SwapButtons::new(page_number, from.0, from.1, to.0, to.1);
        self.commit(&draft, change.into(), "ボタン入れ替え").await
    }

    /// Appends a category. Zero dimensions or style fall back to the first
    /// category's values, then to a 5x5 grid with style 1.
    #[tracing::instrument(skip(self))]
    pub async fn add_category(
        &self,
        draft_id: DraftId,
        name: &str,
        cols: u32,
        rows: u32,
        style_key: u32,
    ) -> Result<Draft, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        let first = draft.document().config().first_category();
        let or_default = |value: u32, from_first: Option<u32>, fallback: u32| {
            if value > 0 {
                value
            } else {
                from_first.filter(|v| *v > 0).unwrap_or(fallback)
            }
        };
        let cols = or_default(cols, first.map(|c| c.cols), DEFAULT_GRID_COLS);
        let rows = or_default(rows, first.map(|c| c.rows), DEFAULT_GRID_ROWS);
        let style_key = or_default(style_key, first.map(|c| c.style_key), DEFAULT_STYLE_KEY);

        let change = AddCategory::new(name, cols, rows, style_key)?;
        self.commit(&draft, change.into(), "カテゴリ追加").await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_category(
        &self,
        draft_id: DraftId,
        page_number: u32,
    ) -> Result<Draft, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        self.commit(&draft, DeleteCategory::new(page_number).into(), "カテゴリ削除")
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn swap_categories(
        &self,
        draft_id: DraftId,
        from_page_number: u32,
        to_page_number: u32,
    ) -> Result<Draft, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        let config = draft.document().config();
        let from = require_category_name(config, from_page_number)?;
        let to = require_category_name(config, to_page_number)?;
        if from_page_number == to_page_number {
            return Ok(draft);
        }

        let action = format!("カテゴリ入れ替え ({from} <-> {to})");
        let change = SwapCategories::new(from_page_number, to_page_number);
        self.commit(&draft, change.into(), &action).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_category_grid(
        &self,
        draft_id: DraftId,
        page_number: u32,
        cols: u32,
        rows: u32,
    ) -> Result<Draft, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        let category = draft
            .document()
            .config()
            .category(page_number)
            .ok_or(DocumentError::CategoryNotFound { page_number })?;

        let action = format!(
            "グリッド変更 ({}、{}x{} -> {}x{})",
            display_text(&category.name, &format!("ページ{page_number}")),
            category.cols,
            category.rows,
            cols,
            rows
        );
        let change =
            UpdateCategoryGrid::new(page_number, category.cols, category.rows, cols, rows)?;
        self.commit(&draft, change.into(), &action).await
    }

    /// Sets the price of one button. The price is normalised and must be
    /// numeric.
    #[tracing::instrument(skip(self))]
    pub async fn update_unit_price(
        &self,
        draft_id: DraftId,
        page_number: u32,
        button_id: &ButtonId,
        unit_price: &str,
    ) -> Result<Draft, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        let button = require_button(draft.document().config(), page_number, button_id)?;

        let change = UpdateUnitPrice::new(
            page_number,
            button_id.clone(),
            button.unit_price.clone(),
            unit_price,
        )?;
        self.commit(&draft, change.into(), "価格変更").await
    }

    // Handy catalog edits

    /// Appends a handy category with the smallest unused numeric code from
    /// 10 upward. A blank description takes the code.
    #[tracing::instrument(skip(self))]
    pub async fn add_handy_category(
        &self,
        draft_id: DraftId,
        description: &str,
    ) -> Result<Draft, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        let (draft, handy) = self.loader.handy_catalog(&draft).await?;

        let code = next_handy_category_code(&handy);
        let description = display_text(description, &code).to_string();
        let action = format!("ハンディカテゴリ追加 ({description})");
        let category = CatalogCategory::new(code, description, Vec::new());
        let change = AddHandyCategory::new(handy.len(), category)?;
        self.commit(&draft, change.into(), &action).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_handy_category(
        &self,
        draft_id: DraftId,
        category_code: &str,
    ) -> Result<Draft, DraftError> {
        let code = validation::require_text("categoryCode", category_code)?;
        let draft = self.require_draft(draft_id).await?;
        let (draft, handy) = self.loader.handy_catalog(&draft).await?;

        let index = handy
            .category_index(&code)
            .ok_or_else(|| DocumentError::HandyCategoryNotFound { code: code.clone() })?;
        let category = handy.categories()[index].clone();

        let action = format!(
            "ハンディカテゴリ削除 ({})",
            display_text(&category.description, &code)
        );
        let change = DeleteHandyCategory::new(index, category);
        self.commit(&draft, change.into(), &action).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn reorder_handy_categories(
        &self,
        draft_id: DraftId,
        from_index: usize,
        to_index: usize,
    ) -> Result<Draft, DraftError> {
        let draft = self.require_draft(draft_id).await?;
        let (draft, handy) = self.loader.handy_catalog(&draft).await?;

        let moved = handy.categories().get(from_index).ok_or(DocumentError::IndexOutOfRange {
            field: "fromIndex",
            index: from_index,
            len: handy.len(),
        })?;
        if to_index >= handy.len() {
            return Err(DocumentError::IndexOutOfRange {
                field: "toIndex",
                index: to_index,
                len: handy.len(),
            }
            .into());
        }
        if from_index == to_index {
            return Ok(draft);
        }

        let action = format!(
            "ハンディカテゴリ移動 ({})",
            display_text(&moved.description, &moved.code)
        );
        let change = ReorderHandyCategories::new(from_index, to_index);
        self.commit(&draft, change.into(), &action).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn swap_handy_categories(
        &self,
        draft_id: DraftId,
        from_code: &str,
        to_code: &str,
    ) -> Result<Draft, DraftError> {
        let change = SwapHandyCategories::new(from_code, to_code)?;
        let draft = self.require_draft(draft_id).await?;
        let (draft, handy) = self.loader.handy_catalog(&draft).await?;
        if change.from_code == change.to_code {
            return Ok(draft);
        }

        let from = require_handy_category(&handy, &change.from_code)?;
        let to = require_handy_category(&handy, &change.to_code)?;
        let action = format!(
            "ハンディカテゴリ入れ替え ({} <-> {})",
            display_text(&from.description, &from.code),
            display_text(&to.description, &to.code)
        );
        self.commit(&draft, change.into(), &action).await
    }

    /// Copies an item from an item catalog category into a handy category,
    /// keeping the source category's relative order.
    #[tracing::instrument(skip(self))]
    pub async fn add_handy_item(
        &self,
        draft_id: DraftId,
        handy_category_code: &str,
        source_category_code: &str,
        item_code: &str,
    ) -> Result<Draft, DraftError> {
        let handy_code = validation::require_text("handyCategoryCode", handy_category_code)?;
        let source_code = validation::require_text("sourceCategoryCode", source_category_code)?;
        let item_code = validation::require_text("itemCode", item_code)?;

        let draft = self.require_draft(draft_id).await?;
        let (draft, handy) = self.loader.handy_catalog(&draft).await?;
        let (draft, items) = self.loader.item_catalog(&draft).await?;

        let handy_category = require_handy_category(&handy, &handy_code)?;
        let source_category = items.find_category(&source_code).ok_or_else(|| {
            DocumentError::CatalogCategoryNotFound {
                code: source_code.clone(),
            }
        })?;

        let change = AddHandyItem::from_source(handy_category, source_category, &item_code)?;
        let action = button_action(
            "ハンディ商品追加",
            display_text(&handy_category.description, &handy_code),
            &change.item.item_name,
        );
        self.commit(&draft, change.into(), &action).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_handy_item(
        &self,
        draft_id: DraftId,
        category_code: &str,
        item_index: usize,
    ) -> Result<Draft, DraftError> {
        let code = validation::require_text("categoryCode", category_code)?;
        let draft = self.require_draft(draft_id).await?;
        let (draft, handy) = self.loader.handy_catalog(&draft).await?;

        let category = require_handy_category(&handy, &code)?;
        let item = category
            .items
            .get(item_index)
            .ok_or(DocumentError::IndexOutOfRange {
                field: "itemIndex",
                index: item_index,
                len: category.items.len(),
            })?;

        let action = button_action(
            "ハンディ商品削除",
            display_text(&category.description, &code),
            &item_display_name(&item.item_name, &item.item_code),
        );
        let change = DeleteHandyItem::new(&code, item_index, item.clone())?;
        self.commit(&draft, change.into(), &action).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn reorder_handy_items(
        &self,
        draft_id: DraftId,
        category_code: &str,
        from_index: usize,
        to_index: usize,
    ) -> Result<Draft, DraftError> {
        let change = ReorderHandyItems::new(category_code, from_index, to_index)?;
        let draft = self.require_draft(draft_id).await?;
        let (draft, handy) = self.loader.handy_catalog(&draft).await?;

        let category = require_handy_category(&handy, &change.category_code)?;
        let len = category.items.len();
        for (field, index) in [("fromIndex", from_index), ("toIndex", to_index)] {
            if index >= len {
                return Err(DocumentError::IndexOutOfRange { field, index, len }.into());
            }
        }
        if from_index == to_index {
            return Ok(draft);
        }

        let action = format!(
            "ハンディ商品並び替え ({})",
            display_text(&category.description, &category.code)
        );
        self.commit(&draft, change.into(), &action).await
    }

    // Item master edits

    /// Updates an item master entry and cascades the new code, name and
    /// price to every linked catalog item and button. Saving an entry that
    /// is already in sync everywhere records no history entry.
    #[tracing::instrument(skip(self))]
    pub async fn update_item_master(
        &self,
        draft_id: DraftId,
        update: UpdateItemMaster,
    ) -> Result<Draft, DraftError> {
        let current_code = validation::require_text("currentItemCode", &update.current_code)?;
        let draft = self.require_draft(draft_id).await?;
        let draft = self.loader.ensure_all(&draft).await?;

        let before = draft
            .document()
            .require_item_master_catalog()?
            .find_item(&current_code)
            .cloned()
            .ok_or_else(|| DocumentError::ItemMasterItemNotFound {
                item_code: current_code.clone(),
            })?;
        let after = MasterItem::new(
            update.item_code,
            update.item_name_print,
            update.unit_price,
            update.cost_price,
            update.base_price,
        );
        let change = UpdateItemMasterItem::new(before, after)?;

        let action = format!(
            "商品マスタ更新 ({}、{})",
            current_code, change.after.item_name_print
        );
        self.commit_if_changed(&draft, change.into(), &action)
            .await
    }

    // History

    #[tracing::instrument(skip(self))]
    pub async fn undo(&self, draft_id: DraftId) -> Result<Draft, DraftError> {
        self.navigate(draft_id, "undo", |draft| draft.undo()).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn redo(&self, draft_id: DraftId) -> Result<Draft, DraftError> {
        self.navigate(draft_id, "redo", |draft| draft.redo()).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn jump_to_history_index(
        &self,
        draft_id: DraftId,
        index: usize,
    ) -> Result<Draft, DraftError> {
        self.navigate(draft_id, "jump", |draft| draft.jump_to_history_index(index))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear_history(&self, draft_id: DraftId) -> Result<Draft, DraftError> {
        self.navigate(draft_id, "clear", |draft| Ok(draft.clear_history()))
            .await
    }

    // Internals

    async fn require_draft(&self, draft_id: DraftId) -> Result<Draft, DraftError> {
        self.store
            .find_by_id(draft_id)
            .await?
            .ok_or(DraftError::DraftNotFound(draft_id))
    }

    /// Like [`Self::commit`], but returns the draft as it is when the change
    /// leaves the current document equal.
    async fn commit_if_changed(
        &self,
        draft: &Draft,
        change: Change,
        action: &str,
    ) -> Result<Draft, DraftError> {
        match change.apply(draft.document()) {
            Ok(document) if &document == draft.document() => {
                tracing::debug!(
                    draft_id = %draft.id(),
                    change = change.change_type(),
                    "change left document unchanged"
                );
                Ok(draft.clone())
            }
            _ => self.commit(draft, change, action).await,
        }
    }

    /// Applies a change to a draft and saves the result.
    async fn commit(&self, draft: &Draft, change: Change, action: &str) -> Result<Draft, DraftError> {
        let change_type = change.change_type();
        match draft.apply_change(&change, action) {
            Ok(updated) => {
                self.store.save(updated.clone()).await?;
                metrics::counter!("draft_changes_applied_total", "change" => change_type)
                    .increment(1);
                tracing::info!(
                    draft_id = %updated.id(),
                    change = change_type,
                    history_index = updated.current_index(),
                    "change applied"
                );
                Ok(updated)
            }
            Err(err) => {
                metrics::counter!("draft_changes_rejected_total", "change" => change_type)
                    .increment(1);
                tracing::warn!(draft_id = %draft.id(), change = change_type, error = %err, "change rejected");
                Err(err.into())
            }
        }
    }

    async fn navigate<F>(
        &self,
        draft_id: DraftId,
        operation: &'static str,
        step: F,
    ) -> Result<Draft, DraftError>
    where
        F: FnOnce(&Draft) -> Result<Draft, HistoryError>,
    {
        let draft = self.require_draft(draft_id).await?;
        let moved = step(&draft).inspect_err(|err| {
            tracing::debug!(draft_id = %draft_id, operation, error = %err, "history navigation refused");
        })?;
        self.store.save(moved.clone()).await?;
        metrics::counter!("draft_history_navigations_total", "operation" => operation).increment(1);
        Ok(moved)
    }
}

fn require_page(config: &PosConfig, page_number: u32) -> Result<&Page, DocumentError> {
    config
        .page(page_number)
        .ok_or(DocumentError::PageNotFound { page_number })
}

fn require_button<'a>(
    config: &'a PosConfig,
    page_number: u32,
    button_id: &ButtonId,
) -> Result<&'a Button, DocumentError> {
    require_page(config, page_number)?
        .find_button(button_id)
        .ok_or_else(|| DocumentError::ButtonNotFound {
            button_id: button_id.clone(),
        })
}

fn require_category_name(config: &PosConfig, page_number: u32) -> Result<String, DocumentError> {
    config
        .category(page_number)
        .map(|_| category_name(config, page_number))
        .ok_or(DocumentError::CategoryNotFound { page_number })
}

fn require_handy_category<'a>(
    handy: &'a Catalog,
    code: &str,
) -> Result<&'a CatalogCategory, DocumentError> {
    handy
        .find_category(code)
        .ok_or_else(|| DocumentError::HandyCategoryNotFound {
            code: code.to_string(),
        })
}

fn next_handy_category_code(handy: &Catalog) -> String {
    (FIRST_HANDY_CATEGORY_CODE..)
        .map(|n| n.to_string())
        .find(|code| {
            !handy
                .categories()
                .iter()
                .any(|c| c.code.trim() == code.as_str())
        })
        .unwrap_or_default()
}

fn display_text<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

fn item_display_name(item_name: &str, item_code: &str) -> String {
    display_text(item_name, display_text(item_code, "商品不明")).to_string()
}

fn category_name(config: &PosConfig, page_number: u32) -> String {
    let fallback = format!("ページ{page_number}");
    config
        .category(page_number)
        .map(|c| display_text(&c.name, &fallback).to_string())
        .unwrap_or(fallback)
}

fn button_action(base: &str, category: &str, item: &str) -> String {
    format!(
        "{} ({}、{})",
        base,
        display_text(category, "カテゴリ不明"),
        display_text(item, "商品不明")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_fall_back_on_blank_values() {
        assert_eq!(button_action("ボタン追加", "Food", " "), "ボタン追加 (Food、商品不明)");
        assert_eq!(item_display_name("", "1001"), "1001");
        assert_eq!(item_display_name("Coffee", "1001"), "Coffee");
    }

    #[test]
    fn handy_codes_start_at_ten_and_fill_gaps() {
        let catalog = Catalog::new(vec![
            CatalogCategory::new("10", "a", vec![]),
            CatalogCategory::new("12", "b", vec![]),
        ])
        .unwrap();
        assert_eq!(next_handy_category_code(&catalog), "11");
        assert_eq!(next_handy_category_code(&Catalog::default()), "10");
    }

    #[test]
    fn category_name_uses_page_fallback() {
        let config = PosConfig::default();
        assert_eq!(category_name(&config, 4), "ページ4");
    }
}
