//! Draft layer of the POS configuration editor.
//!
//! This crate provides:
//! - The `Draft` aggregate: an imported source with a bounded, navigable
//!   history of document snapshots
//! - `CatalogLoader`, which derives catalogs from the original source once
//!   and caches them in the draft
//! - The ports a host implements (`SourceReader`, `SourceExporter`,
//!   `DraftStore`) and an in-memory store
//! - `DraftService`, the use-case API that labels and applies edits

#![recursion_limit = "256"]

pub mod config;
pub mod draft;
pub mod error;
pub mod loader;
pub mod ports;
pub mod service;
pub mod store;

pub use config::DraftConfig;
pub use draft::{Draft, HistoryEntry, HistoryItem, HistorySummary};
pub use error::{DraftError, HistoryError, SourceError, StoreError};
pub use loader::{CatalogLoader, LoadedCatalog};
pub use ports::{DraftStore, SourceBundle, SourceExporter, SourceReader};
pub use service::{DraftService, UpdateItemMaster};
pub use store::InMemoryDraftStore;
