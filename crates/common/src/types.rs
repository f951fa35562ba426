use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Prefix used when a draft id is rendered as text.
const DRAFT_ID_PREFIX: &str = "dft_";

/// Prefix of button ids minted for buttons created during editing.
const NEW_BUTTON_ID_PREFIX: &str = "PresetMenuButtonMaster#NEW-";

/// Unique identifier for a draft (one imported configuration being edited).
///
/// Wraps a UUID to keep draft ids apart from other UUID-based identifiers.
/// The textual form carries a `dft_` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(Uuid);

impl DraftId {
    /// Creates a new random draft ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a draft ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", DRAFT_ID_PREFIX, self.0)
    }
}

/// Error returned when a string is not a valid draft id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid draft id: {0}")]
pub struct ParseDraftIdError(String);

impl FromStr for DraftId {
    type Err = ParseDraftIdError;

    /// Accepts both the prefixed (`dft_<uuid>`) and the bare UUID form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let uuid_part = raw.strip_prefix(DRAFT_ID_PREFIX).unwrap_or(raw);
        Uuid::parse_str(uuid_part)
            .map(Self)
            .map_err(|_| ParseDraftIdError(s.to_string()))
    }
}

impl From<Uuid> for DraftId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<DraftId> for Uuid {
    fn from(id: DraftId) -> Self {
        id.0
    }
}

/// Stable identity of a POS button.
///
/// Independent of the button's grid position. Ids read from the original
/// spreadsheet are kept verbatim; ids for buttons created while editing are
/// minted with [`ButtonId::mint`] and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonId(String);

impl ButtonId {
    /// Wraps an existing button id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh id for a newly created button.
    pub fn mint() -> Self {
        Self(format!("{}{}", NEW_BUTTON_ID_PREFIX, Uuid::new_v4()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for ButtonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ButtonId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ButtonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ButtonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
