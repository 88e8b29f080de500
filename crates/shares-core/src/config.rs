//! Pipeline configuration.
//!
//! [`PipelineConfig`] replaces what would otherwise be module-level constants
//! (storage key, default identifier, cutoff) so hosts and tests can run the
//! pipeline against arbitrary identifiers and storage namespaces.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SharesError};

/// Default storage key for the persisted snapshot.
pub const DEFAULT_CACHE_KEY: &str = "data.json";

/// Identifier used when the query string does not carry one.
pub const DEFAULT_IDENTIFIER: &str = "00010795";

/// Query parameter holding the company identifier.
pub const DEFAULT_IDENTIFIER_PARAM: &str = "CIK";

/// Observations must have a fiscal year strictly greater than this.
pub const DEFAULT_FISCAL_YEAR_CUTOFF: &str = "2020";

/// Client label sent with every remote request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; ExampleBot/1.0; +https://example.com/bot)";

/// Identifiers of the five display slots written by the presenter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySlots {
    /// Slot receiving the entity name.
    pub entity_name: String,
    /// Slot receiving the maximum value.
    pub max_value: String,
    /// Slot receiving the fiscal year of the maximum.
    pub max_fiscal_year: String,
    /// Slot receiving the minimum value.
    pub min_value: String,
    /// Slot receiving the fiscal year of the minimum.
    pub min_fiscal_year: String,
}

impl Default for DisplaySlots {
    fn default() -> Self {
        Self {
            entity_name: "share-entity-name".to_string(),
            max_value: "share-max-value".to_string(),
            max_fiscal_year: "share-max-fy".to_string(),
            min_value: "share-min-value".to_string(),
            min_fiscal_year: "share-min-fy".to_string(),
        }
    }
}

/// Configuration passed explicitly into the orchestrator.
///
/// Every field has a default, so a partial JSON document deserializes into a
/// complete configuration.
///
/// # Example
///
/// ```
/// use shares_core::PipelineConfig;
///
/// let config = PipelineConfig::default()
///     .with_cache_key("acme.json")
///     .with_default_identifier("0000320193");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Key under which the snapshot is stored.
    pub cache_key: String,
    /// Identifier used when none is supplied.
    pub default_identifier: String,
    /// Query parameter carrying the identifier.
    pub identifier_param: String,
    /// Fiscal-year cutoff (exclusive).
    pub fiscal_year_cutoff: String,
    /// Client label for remote requests.
    pub user_agent: String,
    /// Display slot identifiers.
    pub slots: DisplaySlots,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            default_identifier: DEFAULT_IDENTIFIER.to_string(),
            identifier_param: DEFAULT_IDENTIFIER_PARAM.to_string(),
            fiscal_year_cutoff: DEFAULT_FISCAL_YEAR_CUTOFF.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            slots: DisplaySlots::default(),
        }
    }
}

impl PipelineConfig {
    /// Set the storage key.
    #[must_use]
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = key.into();
        self
    }

    /// Set the fallback identifier.
    #[must_use]
    pub fn with_default_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.default_identifier = identifier.into();
        self
    }

    /// Set the query parameter carrying the identifier.
    #[must_use]
    pub fn with_identifier_param(mut self, param: impl Into<String>) -> Self {
        self.identifier_param = param.into();
        self
    }

    /// Set the fiscal-year cutoff.
    #[must_use]
    pub fn with_fiscal_year_cutoff(mut self, cutoff: impl Into<String>) -> Self {
        self.fiscal_year_cutoff = cutoff.into();
        self
    }

    /// Set the client label for remote requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the display slot identifiers.
    #[must_use]
    pub fn with_slots(mut self, slots: DisplaySlots) -> Self {
        self.slots = slots;
        self
    }

    /// Check that the fields the pipeline cannot work without are non-empty.
    ///
    /// # Errors
    /// Returns [`SharesError::InvalidParameter`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("cache_key", &self.cache_key),
            ("default_identifier", &self.default_identifier),
            ("identifier_param", &self.identifier_param),
        ] {
            if value.is_empty() {
                return Err(SharesError::InvalidParameter(format!("{} is empty", name)));
            }
        }
        Ok(())
    }
}
