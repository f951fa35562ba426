//! Catalog loader: derives catalogs from the original source on first use
//! and caches them in the draft.

use std::sync::Arc;

use document::{Catalog, CatalogKind, ItemMasterCatalog};

use crate::draft::Draft;
use crate::error::DraftError;
use crate::ports::{DraftStore, SourceReader};

/// A catalog returned by [`CatalogLoader::load_catalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedCatalog {
    Item(Catalog),
    Handy(Catalog),
    ItemMaster(ItemMasterCatalog),
}

/// Materializes catalogs of a draft's current document.
///
/// A cache miss parses the original source once and fills all three
/// catalogs, whichever one was asked for. The filled draft is saved under the
/// same history position, so later requests of any kind hit the cache.
pub struct CatalogLoader<R, S> {
    reader: Arc<R>,
    store: Arc<S>,
}

impl<R, S> Clone for CatalogLoader<R, S> {
    fn clone(&self) -> Self {
        Self {
            reader: Arc::clone(&self.reader),
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: SourceReader, S: DraftStore> CatalogLoader<R, S> {
    pub fn new(reader: Arc<R>, store: Arc<S>) -> Self {
        Self { reader, store }
    }

    /// Returns the requested catalog, filling the cache first if needed.
    ///
    /// The returned draft is the one to continue working with; it equals the
    /// input when the catalog was already present.
    pub async fn load_catalog(
        &self,
        draft: &Draft,
        kind: CatalogKind,
    ) -> Result<(Draft, LoadedCatalog), DraftError> {
        let draft = if draft.document().has_catalog(kind) {
            draft.clone()
        } else {
            let filled = self.fill_from_source(draft)?;
            self.store.save(filled.clone()).await?;
            filled
        };

        let document = draft.document();
        let loaded = match kind {
            CatalogKind::Item => document.item_catalog().cloned().map(LoadedCatalog::Item),
            CatalogKind::Handy => document.handy_catalog().cloned().map(LoadedCatalog::Handy),
            CatalogKind::ItemMaster => document
                .item_master_catalog()
                .cloned()
                .map(LoadedCatalog::ItemMaster),
        };
        let loaded =
            loaded.ok_or_else(|| DraftError::IllegalState(format!("{kind} missing after load")))?;
        Ok((draft, loaded))
    }

    pub async fn item_catalog(&self, draft: &Draft) -> Result<(Draft, Catalog), DraftError> {
        match self.load_catalog(draft, CatalogKind::Item).await? {
            (draft, LoadedCatalog::Item(catalog)) => Ok((draft, catalog)),
            _ => Err(unexpected(CatalogKind::Item)),
        }
    }

    pub async fn handy_catalog(&self, draft: &Draft) -> Result<(Draft, Catalog), DraftError> {
        match self.load_catalog(draft, CatalogKind::Handy).await? {
            (draft, LoadedCatalog::Handy(catalog)) => Ok((draft, catalog)),
            _ => Err(unexpected(CatalogKind::Handy)),
        }
    }

    pub async fn item_master_catalog(
        &self,
        draft: &Draft,
    ) -> Result<(Draft, ItemMasterCatalog), DraftError> {
        match self.load_catalog(draft, CatalogKind::ItemMaster).await? {
            (draft, LoadedCatalog::ItemMaster(catalog)) => Ok((draft, catalog)),
            _ => Err(unexpected(CatalogKind::ItemMaster)),
        }
    }

    /// Makes sure all three catalogs are present in the current document.
    pub async fn ensure_all(&self, draft: &Draft) -> Result<Draft, DraftError> {
        if !draft.needs_catalogs() {
            return Ok(draft.clone());
        }
        let filled = self.fill_from_source(draft)?;
        self.store.save(filled.clone()).await?;
        Ok(filled)
    }

    fn fill_from_source(&self, draft: &Draft) -> Result<Draft, DraftError> {
        tracing::debug!(draft_id = %draft.id(), "deriving catalogs from original source");
        metrics::counter!("draft_source_reads_total").increment(1);

        let bundle = self.reader.read(draft.original_source())?;
        let filled = draft.fill_catalogs(
            &bundle.item_catalog,
            &bundle.handy_catalog,
            &bundle.item_master_catalog,
        );

        if filled.needs_catalogs() {
            return Err(DraftError::IllegalState(
                "catalogs missing after source read".to_string(),
            ));
        }
        Ok(filled)
    }
}

fn unexpected(kind: CatalogKind) -> DraftError {
    DraftError::IllegalState(format!("loader returned a different catalog than {kind}"))
}
