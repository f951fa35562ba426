use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::DraftId;
use tokio::sync::RwLock;

use crate::draft::Draft;
use crate::error::StoreError;
use crate::ports::DraftStore;

/// In-memory draft store.
///
/// Drafts live for the lifetime of the process. Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryDraftStore {
    drafts: Arc<RwLock<HashMap<DraftId, Draft>>>,
}

impl InMemoryDraftStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored drafts.
    pub async fn draft_count(&self) -> usize {
        self.drafts.read().await.len()
    }

    /// Removes all drafts.
    pub async fn clear(&self) {
        self.drafts.write().await.clear();
    }
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn save(&self, draft: Draft) -> Result<(), StoreError> {
        self.drafts.write().await.insert(draft.id(), draft);
        Ok(())
    }

    async fn find_by_id(&self, id: DraftId) -> Result<Option<Draft>, StoreError> {
        Ok(self.drafts.read().await.get(&id).cloned())
    }
}
