//! Tunables for the page behaviors.
//!
//! Defaults come from [`crate::consts`]. A page may override any subset by
//! embedding a JSON object in
//! `<script type="application/json" id="academy-ui-config">`. A malformed or
//! invalid override is reported and the defaults are used instead.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use log::LevelFilter;
use serde::Deserialize;

use crate::consts::{
    ALERT_DISMISS_MS, ANIMATE_THRESHOLD, BACK_TO_TOP_OFFSET_PX, CONFIG_SCRIPT_ID, NAVBAR_HIDE_OFFSET_PX,
    NAVBAR_SCROLLED_OFFSET_PX, TOAST_FADE_MS, TOAST_VISIBLE_MS, WORDS_PER_MINUTE,
};
use crate::dom::Document;

/// Error returned by [`EnhanceConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnhanceConfig {
    pub navbar_scrolled_offset: f64,
    pub navbar_hide_offset: f64,
    pub back_to_top_offset: f64,
    pub toast_visible_ms: u32,
    pub toast_fade_ms: u32,
    pub alert_dismiss_ms: u32,
    pub words_per_minute: u32,
    pub animate_threshold: f64,
    pub copy_success_message: String,
    pub copy_failure_message: String,
    /// Text after the minute count in reading-time badges.
    pub reading_time_suffix: String,
    /// `log` level filter name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            navbar_scrolled_offset: NAVBAR_SCROLLED_OFFSET_PX,
            navbar_hide_offset: NAVBAR_HIDE_OFFSET_PX,
            back_to_top_offset: BACK_TO_TOP_OFFSET_PX,
            toast_visible_ms: TOAST_VISIBLE_MS,
            toast_fade_ms: TOAST_FADE_MS,
            alert_dismiss_ms: ALERT_DISMISS_MS,
            words_per_minute: WORDS_PER_MINUTE,
            animate_threshold: ANIMATE_THRESHOLD,
            copy_success_message: "Copied to clipboard!".to_owned(),
            copy_failure_message: "Copy failed".to_owned(),
            reading_time_suffix: "min read".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl EnhanceConfig {
    /// Parse and validate an override object. Missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse an optional override, falling back to defaults on any problem.
    #[must_use]
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring page config: {err}");
                Self::default()
            }
        }
    }

    /// Read the override from the page's config script. Must run after the
    /// document has been parsed, or the script will not be found yet.
    #[must_use]
    pub fn from_document<D: Document>(doc: &D) -> Self {
        let raw = doc.element_by_id(CONFIG_SCRIPT_ID).map(|script| doc.text_content(&script));
        Self::from_json_or_default(raw.as_deref())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.words_per_minute == 0 {
            return Err(ConfigError::Invalid { field: "wordsPerMinute", reason: "must be positive".into() });
        }
        if !(0.0..=1.0).contains(&self.animate_threshold) {
            return Err(ConfigError::Invalid {
                field: "animateThreshold",
                reason: format!("{} is outside 0..=1", self.animate_threshold),
            });
        }
        for (field, value) in [
            ("navbarScrolledOffset", self.navbar_scrolled_offset),
            ("navbarHideOffset", self.navbar_hide_offset),
            ("backToTopOffset", self.back_to_top_offset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid { field, reason: format!("{value} is not a non-negative offset") });
            }
        }
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::Invalid { field: "logLevel", reason: format!("unknown level `{}`", self.log_level) })?;
        Ok(())
    }

    /// Level filter for the console logger. Unknown names fall back to `info`.
    #[must_use]
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
