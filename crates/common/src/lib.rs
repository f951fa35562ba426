//! Identifier types shared by the document model and the draft aggregate.

mod types;

pub use types::{ButtonId, DraftId, ParseDraftIdError};
