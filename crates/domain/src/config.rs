//! Draft engine configuration loaded from environment variables.

/// Default maximum number of history entries per draft.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Draft engine settings with sensible defaults.
///
/// Reads from environment variables:
/// - `POS_DRAFT_HISTORY_LIMIT`: maximum history entries per draft, `0` for
///   no limit (default: `100`)
/// - `POS_DRAFT_EAGER_CATALOGS`: keep the catalogs parsed at import time
///   instead of deriving them on first use (default: `true`)
///
/// With `eager_catalogs` off the source is still parsed once at import for
/// the grid, and parsed one more time when the first catalog is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftConfig {
    pub history_limit: usize,
    pub eager_catalogs: bool,
}

impl DraftConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            history_limit: std::env::var("POS_DRAFT_HISTORY_LIMIT")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.history_limit),
            eager_catalogs: std::env::var("POS_DRAFT_EAGER_CATALOGS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.eager_catalogs),
        }
    }
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            eager_catalogs: true,
        }
    }
}
