//! Configuration for alert registries.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AlertError, Result};

/// Context name an alert list binds when it is given no context.
pub const DEFAULT_VIEW_CONTEXT: &str = "global";

/// Configuration shared by every queue of a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    /// Whether to ask the renderer to scroll to the top after each push.
    pub scroll_to_top: bool,
    /// Length of the scroll animation (in milliseconds).
    pub scroll_duration_ms: u64,
    /// Context an alert list binds when none is given.
    pub view_default_context: String,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            scroll_to_top: true,
            scroll_duration_ms: 200,
            view_default_context: DEFAULT_VIEW_CONTEXT.to_string(),
        }
    }
}

impl AlertsConfig {
    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::Serialization` for malformed JSON and
    /// `AlertError::Config` if validation fails.
    pub fn from_json(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for invalid values.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::Config` if the default view context is empty.
    pub fn validate(&self) -> Result<()> {
        if self.view_default_context.trim().is_empty() {
            return Err(AlertError::Config {
                reason: "view_default_context cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the scroll animation length as a [`Duration`].
    #[must_use]
    pub const fn scroll_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_duration_ms)
    }
}
