//! Page configuration: storage key, DOM selectors and timing knobs.
//!
//! Every field has a default matching the site's markup, so the common case
//! is `SiteConfig::default()`. A page can override any subset by passing a
//! JSON object to `mount_with_config`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_STORAGE_KEY: &str = "marketing-theme";
pub const DEFAULT_SETTLE_DELAY_MS: u32 = 150;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SiteConfig {
    /// `localStorage` key holding the theme preference string.
    pub storage_key: String,
    /// Selector matching the theme toggle buttons.
    pub theme_control_selector: String,
    /// Selector for the container the pill indicator slides inside.
    pub pill_container_selector: String,
    /// Selector for the pill indicator, relative to its container.
    pub pill_indicator_selector: String,
    /// Selector for the timeline container; absent means the timeline is inert.
    pub timeline_container_selector: String,
    /// Selector for the timeline entries, relative to the container.
    pub timeline_item_selector: String,
    /// Selector for an entry's year label, relative to the entry.
    pub year_label_selector: String,
    /// Attribute on an entry descendant carrying the portrait image URL.
    pub portrait_attribute: String,
    /// Attribute on a link carrying the hover preview image URL.
    pub preview_attribute: String,
    /// Quiet period after the last scroll event before portraits show again.
    pub settle_delay_ms: u32,
    /// Console log level name (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            theme_control_selector: r#"[aria-label$="theme"]"#.to_owned(),
            pill_container_selector: ".bg-theme-card-03-hex.rounded-full".to_owned(),
            pill_indicator_selector: ".absolute.rounded-full".to_owned(),
            timeline_container_selector: ".timeline-container".to_owned(),
            timeline_item_selector: "ol > li".to_owned(),
            year_label_selector: ".type-sm".to_owned(),
            portrait_attribute: "data-person-image".to_owned(),
            preview_attribute: "data-preview-image".to_owned(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON config object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed JSON or unknown fields, and
    /// [`Error::LogLevel`] when `logLevel` names no known level.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(raw)?;
        config.log_level()?;
        Ok(config)
    }

    /// The configured console log level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LogLevel`] when the name is not a `log::Level`.
    pub fn log_level(&self) -> Result<log::Level, Error> {
        self.log_level
            .parse()
            .map_err(|_| Error::LogLevel(self.log_level.clone()))
    }
}
