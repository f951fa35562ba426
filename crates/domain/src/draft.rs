//! Draft aggregate: one imported configuration and its edit history.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::DraftId;
use document::{Catalog, Change, Document, DocumentError, ItemMasterCatalog};
use im::Vector;
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// Label of the first history entry.
pub const IMPORT_ACTION: &str = "インポート";

/// Label of the single entry left after clearing the history.
pub const CLEAR_HISTORY_ACTION: &str = "履歴削除";

/// Label used when an edit is applied with a blank label.
pub const DEFAULT_ACTION: &str = "編集";

/// One recorded document snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    index: usize,
    action: String,
    timestamp: DateTime<Utc>,
    document: Document,
}

impl HistoryEntry {
    fn new(index: usize, action: impl Into<String>, document: Document) -> Self {
        Self {
            index,
            action: action.into(),
            timestamp: Utc::now(),
            document,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// History listing without the document snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub entries: Vec<HistoryItem>,
    pub current_index: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub index: usize,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

/// Draft aggregate root.
///
/// Holds the original source bytes, an ordered list of document snapshots and
/// a cursor into it. Every operation returns a new draft; a draft value is
/// never modified after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DraftRecord")]
pub struct Draft {
    id: DraftId,

    /// The imported file, kept verbatim for catalog derivation and export.
    original_source: Arc<[u8]>,

    history: Vector<HistoryEntry>,

    current_index: usize,

    /// Maximum number of history entries; `0` keeps everything.
    history_limit: usize,
}

impl Draft {
    /// Creates a draft whose history holds only the imported document.
    pub fn import(
        id: DraftId,
        original_source: impl Into<Arc<[u8]>>,
        document: Document,
        history_limit: usize,
    ) -> Self {
        Self {
            id,
            original_source: original_source.into(),
            history: Vector::unit(HistoryEntry::new(0, IMPORT_ACTION, document)),
            current_index: 0,
            history_limit,
        }
    }
}

/// Unchecked shape of a stored draft.
#[derive(Deserialize)]
struct DraftRecord {
    id: DraftId,
    original_source: Arc<[u8]>,
    history: Vector<HistoryEntry>,
    current_index: usize,
    history_limit: usize,
}

impl TryFrom<DraftRecord> for Draft {
    type Error = HistoryError;

    /// Rejects an empty history and clamps the cursor onto the last entry.
    fn try_from(record: DraftRecord) -> Result<Self, Self::Error> {
        let last = record
            .history
            .len()
            .checked_sub(1)
            .ok_or(HistoryError::EmptyHistory)?;
        Ok(Self {
            id: record.id,
            original_source: record.original_source,
            current_index: record.current_index.min(last),
            history: record.history,
            history_limit: record.history_limit,
        })
    }
}

// Query methods
impl Draft {
    pub fn id(&self) -> DraftId {
        self.id
    }

    pub fn original_source(&self) -> &[u8] {
        &self.original_source
    }

    pub fn history(&self) -> &Vector<HistoryEntry> {
        &self.history
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    pub fn current_entry(&self) -> &HistoryEntry {
        &self.history[self.current_index]
    }

    /// The document at the current history position.
    pub fn document(&self) -> &Document {
        &self.current_entry().document
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.history.len()
    }

    pub fn history_summary(&self) -> HistorySummary {
        HistorySummary {
            entries: self
                .history
                .iter()
                .map(|entry| HistoryItem {
                    index: entry.index,
                    action: entry.action.clone(),
                    timestamp: entry.timestamp,
                })
                .collect(),
            current_index: self.current_index,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }
}

// Edits
impl Draft {
    /// Applies a change to the current document and records the result.
    ///
    /// Any entries after the current one are discarded. When the history
    /// limit is exceeded the oldest entries are dropped and the remaining
    /// ones renumbered. On error the draft is unchanged.
    pub fn apply_change(&self, change: &Change, action: &str) -> Result<Self, DocumentError> {
        let document = change.apply(self.document())?;

        let action = if action.trim().is_empty() {
            DEFAULT_ACTION
        } else {
            action
        };

        let mut history = self.history.take(self.current_index + 1);
        history.push_back(HistoryEntry::new(history.len(), action, document));

        let overflow = match self.history_limit {
            0 => 0,
            limit => history.len().saturating_sub(limit),
        };
        if overflow > 0 {
            history = history
                .skip(overflow)
                .into_iter()
                .enumerate()
                .map(|(index, entry)| HistoryEntry { index, ..entry })
                .collect();
        }

        Ok(Self {
            current_index: history.len() - 1,
            history,
            ..self.clone()
        })
    }
}

// History navigation
impl Draft {
    pub fn undo(&self) -> Result<Self, HistoryError> {
        if !self.can_undo() {
            return Err(HistoryError::NothingToUndo);
        }
        Ok(self.at(self.current_index - 1))
    }

    pub fn redo(&self) -> Result<Self, HistoryError> {
        if !self.can_redo() {
            return Err(HistoryError::NothingToRedo);
        }
        Ok(self.at(self.current_index + 1))
    }

    /// Moves the cursor to any entry without discarding history.
    pub fn jump_to_history_index(&self, index: usize) -> Result<Self, HistoryError> {
        if index >= self.history.len() {
            return Err(HistoryError::IndexOutOfRange {
                index,
                len: self.history.len(),
            });
        }
        Ok(self.at(index))
    }

    /// Replaces the whole history with a single entry holding the current
    /// document.
    pub fn clear_history(&self) -> Self {
        let document = self.document().clone();
        Self {
            history: Vector::unit(HistoryEntry::new(0, CLEAR_HISTORY_ACTION, document)),
            current_index: 0,
            ..self.clone()
        }
    }

    fn at(&self, index: usize) -> Self {
        Self {
            current_index: index,
            ..self.clone()
        }
    }
}

// Cache fill
impl Draft {
    /// Returns true if the current document lacks any derivable catalog.
    pub fn needs_catalogs(&self) -> bool {
        let document = self.document();
        document.item_catalog().is_none()
            || document.handy_catalog().is_none()
            || document.item_master_catalog().is_none()
    }

    /// Fills absent catalogs in every history entry from one parse of the
    /// original source.
    ///
    /// This is not an edit: no entry is added, the cursor does not move, and
    /// catalogs already present (including edited ones) are kept.
    pub(crate) fn fill_catalogs(
        &self,
        item_catalog: &Catalog,
        handy_catalog: &Catalog,
        item_master_catalog: &ItemMasterCatalog,
    ) -> Self {
        let history = self
            .history
            .iter()
            .map(|entry| HistoryEntry {
                document: entry
                    .document
                    .fill_missing_catalogs(item_catalog, handy_catalog, item_master_catalog),
                ..entry.clone()
            })
            .collect();
        Self {
            history,
            ..self.clone()
        }
    }
}
