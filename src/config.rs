//! Site configuration module.
//!
//! Loads `config.toml` from the content root and merges it on top of the
//! stock defaults. This file holds the build-time settings of the page
//! itself: document metadata, hero layout, the site-wide revalidation
//! default and the theme colors.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "About"           # Document <title>
//! lang = "en"               # <html lang>
//! avatar = "/avatar.png"    # Avatar shown in the hero region
//!
//! [hero]
//! tag_limit = 6             # How many tags the hero region shows
//!
//! [revalidate]
//! default_seconds = 60      # Site-wide regeneration interval (omit to use 60)
//!
//! [theme]
//! accent = "#22c55e"
//! gradient_from = "#6366f1"
//! gradient_to = "#3b82f6"
//! ```
//!
//! Unknown keys are rejected to catch typos early. Note that
//! `revalidate.default_seconds` is *not* validated here: an unusable value
//! simply falls through to the next tier of the revalidation policy.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document-level settings.
    pub site: SiteSection,
    /// Hero region layout.
    pub hero: HeroConfig,
    /// Site-wide regeneration default.
    pub revalidate: RevalidateConfig,
    /// Colors injected as CSS custom properties.
    pub theme: ThemeConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hero.tag_limit == 0 {
            return Err(ConfigError::Validation(
                "hero.tag_limit must be at least 1".into(),
            ));
        }
        if self.site.avatar.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.avatar must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub title: String,
    pub lang: String,
    /// Fixed avatar reference. Not resolved from the snapshot.
    pub avatar: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "About".to_string(),
            lang: "en".to_string(),
            avatar: "/avatar.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Number of leading tags displayed around the avatar.
    pub tag_limit: usize,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self { tag_limit: 6 }
    }
}

/// Site-wide regeneration settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevalidateConfig {
    /// Second tier of the revalidation policy. Kept raw so that a bad value
    /// is a fallthrough rather than a config error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_seconds: Option<RawSetting>,
}

/// A setting written either as a TOML integer or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSetting {
    Integer(i64),
    Text(String),
}

impl RawSetting {
    pub fn to_text(&self) -> String {
        match self {
            RawSetting::Integer(n) => n.to_string(),
            RawSetting::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Accent color for highlighted words.
    pub accent: String,
    /// Introduction card gradient start.
    pub gradient_from: String,
    /// Introduction card gradient end.
    pub gradient_to: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: "#22c55e".to_string(),
            gradient_from: "#6366f1".to_string(),
            gradient_to: "#3b82f6".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `file_name` from `dir` as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_toml(dir: &Path, file_name: &str) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join(file_name);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_toml(root, "config.toml")? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# About page configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Document
# ---------------------------------------------------------------------------
[site]
title = "About"
lang = "en"
# Avatar shown in the hero region. Copied from content/assets/ if present.
avatar = "/avatar.png"

# ---------------------------------------------------------------------------
# Hero region
# ---------------------------------------------------------------------------
[hero]
# How many tags from content.toml are shown around the avatar.
tag_limit = 6

# ---------------------------------------------------------------------------
# Regeneration
# ---------------------------------------------------------------------------
[revalidate]
# Site-wide regeneration interval in seconds. Used when REVALIDATE_SECONDS
# is neither passed with --set nor present in the site snapshot.
# Omit, or use a non-positive value, to fall back to 60.
# default_seconds = 60

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
accent = "#22c55e"
gradient_from = "#6366f1"
gradient_to = "#3b82f6"
"##
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --color-accent: {accent};
    --intro-from: {from};
    --intro-to: {to};
}}"#,
        accent = theme.accent,
        from = theme.gradient_from,
        to = theme.gradient_to,
    )
}
