//! Shared test utilities.
//!
//! Snapshot builders, in-memory providers and HTML probes used across the
//! module test suites.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let output = compose_with(&snapshot(json!({ "bio": "hi" })), &ContentModel::default());
//! assert_eq!(tile_count(&output.html), 9);
//! ```

use crate::compose::{self, RenderOutput};
use crate::config::SiteConfig;
use crate::content::{ContentModel, Skill};
use crate::resolve::{Overrides, ScopeContext};
use crate::snapshot::{DataProvider, FetchError, SiteSnapshot};

/// Build a snapshot from raw JSON, stripping unrelated fields. Panics on
/// malformed input.
pub fn snapshot(raw: serde_json::Value) -> SiteSnapshot {
    SiteSnapshot::from_raw("about", raw).unwrap()
}

/// Compose with no overrides and stock site config.
pub fn compose_with(snapshot: &SiteSnapshot, content: &ContentModel) -> RenderOutput {
    let overrides = Overrides::new();
    let site = SiteConfig::default();
    let scope = ScopeContext {
        overrides: &overrides,
        snapshot,
        site: &site,
    };
    compose::compose(&scope, content)
}

/// Icon-less skills with the given names, in order.
pub fn skills(names: &[&str]) -> Vec<Skill> {
    names
        .iter()
        .map(|name| Skill {
            name: name.to_string(),
            icon: None,
        })
        .collect()
}

/// Number of skill tiles (including the sentinel) in rendered HTML.
pub fn tile_count(html: &str) -> usize {
    html.matches(r#"class="skill-tile"#).count()
}

/// Provider that always returns the same JSON.
pub struct JsonProvider(pub serde_json::Value);

impl DataProvider for JsonProvider {
    fn fetch(&self, _scope_label: &str) -> Result<serde_json::Value, FetchError> {
        Ok(self.0.clone())
    }
}

/// Provider whose upstream is always down.
pub struct FailingProvider;

impl DataProvider for FailingProvider {
    fn fetch(&self, scope_label: &str) -> Result<serde_json::Value, FetchError> {
        Err(FetchError::NotFound {
            scope: scope_label.to_string(),
            path: format!("unreachable/{scope_label}.json").into(),
        })
    }
}
