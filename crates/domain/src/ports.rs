//! Collaborator ports: reading and exporting the original source, and
//! keeping drafts.

use async_trait::async_trait;
use common::DraftId;
use document::{Catalog, ConfigSeed, ItemMasterCatalog, PosConfig};

use crate::draft::Draft;
use crate::error::{SourceError, StoreError};

/// Everything derivable from one parse of the original source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceBundle {
    pub seed: ConfigSeed,
    pub item_catalog: Catalog,
    pub handy_catalog: Catalog,
    pub item_master_catalog: ItemMasterCatalog,
}

/// Parses the original source bytes.
///
/// Parsing is synchronous and may be slow; it is the only potentially
/// expensive step in the draft engine.
pub trait SourceReader: Send + Sync {
    fn read(&self, original_source: &[u8]) -> Result<SourceBundle, SourceError>;
}

/// Renders edited state back into the original format, leaving unrelated
/// content of `original_source` as it was.
pub trait SourceExporter: Send + Sync {
    fn export(
        &self,
        original_source: &[u8],
        config: &PosConfig,
        handy_catalog: Option<&Catalog>,
    ) -> Result<Vec<u8>, SourceError>;
}

/// Keyed storage of whole drafts.
///
/// Only single-key atomic get and put are expected; there is no version
/// check, so concurrent writers of one draft resolve as last-write-wins.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn save(&self, draft: Draft) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: DraftId) -> Result<Option<Draft>, StoreError>;
}
