//! Configuration resolution.
//!
//! A named setting is looked up in an ordered list of sources, highest
//! precedence first:
//!
//! ```text
//! 1. Overrides         --set KEY=VALUE for this invocation
//! 2. Site snapshot     the snapshot's config bag (plus AUTHOR / BIO fields)
//! 3. Compiled defaults DEFAULT_SETTINGS
//! ```
//!
//! The first source holding a non-blank value wins. When none does, the
//! result is [`Setting::Absent`], never an empty string, so callers cannot
//! confuse "unset" with "set to something falsy".

use crate::config::SiteConfig;
use crate::snapshot::SiteSnapshot;
use std::collections::BTreeMap;
use std::fmt;

/// Author display name.
pub const AUTHOR: &str = "AUTHOR";
/// Author biography shown in the introduction card.
pub const BIO: &str = "BIO";
/// Per-scope regeneration interval in seconds.
pub const REVALIDATE_SECONDS: &str = "REVALIDATE_SECONDS";

pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// Compiled-in defaults, consulted last.
pub const DEFAULT_SETTINGS: &[(&str, &str)] = &[(AUTHOR, DEFAULT_AUTHOR)];

/// Which source a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Override,
    Snapshot,
    Default,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Override => write!(f, "override"),
            Origin::Snapshot => write!(f, "snapshot"),
            Origin::Default => write!(f, "default"),
        }
    }
}

/// Result of resolving a setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    Value { value: String, origin: Origin },
    Absent,
}

impl Setting {
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Setting::Value { value, .. } => Some(value),
            Setting::Absent => None,
        }
    }

    pub fn origin(&self) -> Option<Origin> {
        match self {
            Setting::Value { origin, .. } => Some(*origin),
            Setting::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Setting::Absent)
    }
}

/// One layer of the precedence chain.
pub trait Lookup {
    fn origin(&self) -> Origin;
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Per-invocation overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides(BTreeMap<String, String>);

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

impl FromIterator<(String, String)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Lookup for Overrides {
    fn origin(&self) -> Origin {
        Origin::Override
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Parse a `KEY=VALUE` command-line assignment.
///
/// The value may be empty or contain further `=` signs; the key may not be
/// empty.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

impl Lookup for SiteSnapshot {
    fn origin(&self) -> Origin {
        Origin::Snapshot
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let field = match key {
            AUTHOR => self.author.as_ref(),
            BIO => self.bio.as_ref(),
            _ => None,
        };
        self.config_text(key).or_else(|| field.cloned())
    }
}

/// The [`DEFAULT_SETTINGS`] table as a lookup source.
pub struct CompiledDefaults;

impl Lookup for CompiledDefaults {
    fn origin(&self) -> Origin {
        Origin::Default
    }

    fn lookup(&self, key: &str) -> Option<String> {
        DEFAULT_SETTINGS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }
}

/// Everything one build cycle resolves against.
#[derive(Debug, Clone, Copy)]
pub struct ScopeContext<'a> {
    pub overrides: &'a Overrides,
    pub snapshot: &'a SiteSnapshot,
    pub site: &'a SiteConfig,
}

impl<'a> ScopeContext<'a> {
    /// Lookup sources in precedence order.
    pub fn sources(&self) -> [&'a dyn Lookup; 3] {
        [self.overrides, self.snapshot, &CompiledDefaults]
    }
}

/// Resolve `key` against the scope's sources.
pub fn resolve(key: &str, scope: &ScopeContext<'_>) -> Setting {
    resolve_in(key, &scope.sources())
}

/// Resolve `key` against an explicit ordered list of sources.
pub fn resolve_in(key: &str, sources: &[&dyn Lookup]) -> Setting {
    for source in sources {
        if let Some(value) = source.lookup(key)
            && !value.trim().is_empty()
        {
            return Setting::Value {
                value,
                origin: source.origin(),
            };
        }
    }
    Setting::Absent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::snapshot;
    use serde_json::json;

    fn scope<'a>(
        overrides: &'a Overrides,
        snapshot: &'a SiteSnapshot,
        site: &'a SiteConfig,
    ) -> ScopeContext<'a> {
        ScopeContext {
            overrides,
            snapshot,
            site,
        }
    }

    #[test]
    fn override_beats_snapshot_and_default() {
        let mut overrides = Overrides::new();
        overrides.set(AUTHOR, "From CLI");
        let snap = snapshot(json!({ "config": { "AUTHOR": "From snapshot" } }));
        let site = SiteConfig::default();

        let setting = resolve(AUTHOR, &scope(&overrides, &snap, &site));
        assert_eq!(setting.as_deref(), Some("From CLI"));
        assert_eq!(setting.origin(), Some(Origin::Override));
    }

    #[test]
    fn snapshot_beats_default() {
        let overrides = Overrides::new();
        let snap = snapshot(json!({ "config": { "AUTHOR": "From snapshot" } }));
        let site = SiteConfig::default();

        let setting = resolve(AUTHOR, &scope(&overrides, &snap, &site));
        assert_eq!(setting.as_deref(), Some("From snapshot"));
        assert_eq!(setting.origin(), Some(Origin::Snapshot));
    }

    #[test]
    fn compiled_default_used_last() {
        let overrides = Overrides::new();
        let snap = snapshot(json!({}));
        let site = SiteConfig::default();

        let setting = resolve(AUTHOR, &scope(&overrides, &snap, &site));
        assert_eq!(setting.as_deref(), Some("Anonymous"));
        assert_eq!(setting.origin(), Some(Origin::Default));
    }

    #[test]
    fn unknown_key_is_absent_not_empty() {
        let overrides = Overrides::new();
        let snap = snapshot(json!({}));
        let site = SiteConfig::default();

        let setting = resolve("NOT_A_SETTING", &scope(&overrides, &snap, &site));
        assert_eq!(setting, Setting::Absent);
        assert_eq!(setting.as_deref(), None);
    }

    #[test]
    fn blank_values_fall_through() {
        let mut overrides = Overrides::new();
        overrides.set(AUTHOR, "   ");
        let snap = snapshot(json!({ "config": { "AUTHOR": "" } }));
        let site = SiteConfig::default();

        let setting = resolve(AUTHOR, &scope(&overrides, &snap, &site));
        assert_eq!(setting.origin(), Some(Origin::Default));
    }

    #[test]
    fn null_in_snapshot_is_missing() {
        let overrides = Overrides::new();
        let snap = snapshot(json!({ "config": { "BIO": null } }));
        let site = SiteConfig::default();
        assert!(resolve(BIO, &scope(&overrides, &snap, &site)).is_absent());
    }

    #[test]
    fn snapshot_content_fields_back_the_config_bag() {
        let overrides = Overrides::new();
        let snap = snapshot(json!({ "bio": "Field bio" }));
        let site = SiteConfig::default();
        let setting = resolve(BIO, &scope(&overrides, &snap, &site));
        assert_eq!(setting.as_deref(), Some("Field bio"));

        let snap = snapshot(json!({ "bio": "Field bio", "config": { "BIO": "Bag bio" } }));
        let setting = resolve(BIO, &scope(&overrides, &snap, &site));
        assert_eq!(setting.as_deref(), Some("Bag bio"));
    }

    #[test]
    fn numeric_snapshot_values_resolve_as_text() {
        let overrides = Overrides::new();
        let snap = snapshot(json!({ "config": { "REVALIDATE_SECONDS": 90 } }));
        let site = SiteConfig::default();
        let setting = resolve(REVALIDATE_SECONDS, &scope(&overrides, &snap, &site));
        assert_eq!(setting.as_deref(), Some("90"));
    }

    #[test]
    fn resolve_in_with_no_sources_is_absent() {
        assert!(resolve_in(AUTHOR, &[]).is_absent());
    }

    #[test]
    fn parse_assignment_cases() {
        assert_eq!(
            parse_assignment("BIO=hello"),
            Ok(("BIO".to_string(), "hello".to_string()))
        );
        assert_eq!(
            parse_assignment("URL=a=b"),
            Ok(("URL".to_string(), "a=b".to_string()))
        );
        assert_eq!(
            parse_assignment("EMPTY="),
            Ok(("EMPTY".to_string(), String::new()))
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn overrides_collect_from_pairs() {
        let overrides: Overrides = vec![("A".to_string(), "1".to_string())]
            .into_iter()
            .collect();
        assert_eq!(overrides.lookup("A").as_deref(), Some("1"));
        assert_eq!(overrides.lookup("B"), None);
    }
}
