//! Page behavior configuration
//!
//! Defaults match the stock markup conventions (`alert-permanent`,
//! `data-bs-toggle="tooltip"`, 5 second alert lifetime). A page can override
//! them with a JSON blob, typically embedded in a
//! `<script type="application/json">` block.

use fos_dom::{Selector, SelectorError};
use serde::{Deserialize, Serialize};

/// Default alert lifetime (ms)
pub const DEFAULT_ALERT_DISMISS_DELAY_MS: u64 = 5000;

/// Class that exempts an alert from auto-dismissal
pub const DEFAULT_PERMANENT_ALERT_CLASS: &str = "alert-permanent";

/// Tooltip trigger selector
pub const DEFAULT_TOOLTIP_SELECTOR: &str = "[data-bs-toggle=\"tooltip\"]";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid selector in `{field}`: {source}")]
    InvalidSelector {
        field: &'static str,
        #[source]
        source: SelectorError,
    },

    #[error("Invalid class name: {0:?}")]
    InvalidClassName(String),
}

/// Tunables for the page behaviors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Delay before a non-permanent alert is closed
    pub alert_dismiss_delay_ms: u64,
    /// Alerts carrying this class are never auto-dismissed
    pub permanent_alert_class: String,
    /// Elements that receive a tooltip
    pub tooltip_selector: String,
    /// Smooth (animated) scrolling for anchors and validation focus
    pub smooth_scroll: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            alert_dismiss_delay_ms: DEFAULT_ALERT_DISMISS_DELAY_MS,
            permanent_alert_class: DEFAULT_PERMANENT_ALERT_CLASS.to_string(),
            tooltip_selector: DEFAULT_TOOLTIP_SELECTOR.to_string(),
            smooth_scroll: true,
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check that selector fields parse and the permanent class is a single token
    pub fn validate(&self) -> Result<(), ConfigError> {
        Selector::parse(&self.tooltip_selector).map_err(|source| ConfigError::InvalidSelector {
            field: "tooltip_selector",
            source,
        })?;

        let class = &self.permanent_alert_class;
        if class.is_empty() || class.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidClassName(class.clone()));
        }
        Selector::parse(&self.alert_selector()).map_err(|_| ConfigError::InvalidClassName(class.clone()))?;
        Ok(())
    }

    /// Selector for alerts that get auto-dismissed
    pub fn alert_selector(&self) -> String {
        format!(".alert:not(.{})", self.permanent_alert_class)
    }
}
