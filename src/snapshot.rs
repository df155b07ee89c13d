//! Site snapshot and the data provider seam.
//!
//! A build cycle queries its [`DataProvider`] exactly once for the page's
//! scope label and turns the raw JSON into a [`SiteSnapshot`]. The snapshot
//! is immutable for the rest of the cycle.
//!
//! ## Snapshot Format
//!
//! ```json
//! {
//!   "config": { "AUTHOR": "Ada", "REVALIDATE_SECONDS": "120" },
//!   "author": "Ada",
//!   "bio": "Writes compilers for fun.",
//!   "siteInfo": { "title": "Ada's notes" },
//!   "post": { "...": "dropped before composition" }
//! }
//! ```
//!
//! Every field is optional. Entries that belong to other pages (see
//! [`UNRELATED_FIELDS`]) are removed from the raw object before it is
//! deserialized, so they can never reach the About page. Anything else is
//! kept verbatim in [`SiteSnapshot::extra`] for the surrounding layout.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level snapshot entries that are never passed to this page.
pub const UNRELATED_FIELDS: &[&str] = &["post"];

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("No snapshot for scope '{scope}' at {}", .path.display())]
    NotFound { scope: String, path: PathBuf },
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Snapshot for scope '{0}' is not a JSON object")]
    NotAnObject(String),
}

/// Source of global site data, queried once per build cycle.
pub trait DataProvider {
    /// Fetch the raw snapshot for `scope_label`.
    fn fetch(&self, scope_label: &str) -> Result<serde_json::Value, FetchError>;
}

/// Reads `<dir>/<scope>.json`.
#[derive(Debug, Clone)]
pub struct FileProvider {
    dir: PathBuf,
}

impl FileProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn snapshot_path(&self, scope_label: &str) -> PathBuf {
        self.dir.join(format!("{scope_label}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DataProvider for FileProvider {
    fn fetch(&self, scope_label: &str) -> Result<serde_json::Value, FetchError> {
        let path = self.snapshot_path(scope_label);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FetchError::NotFound {
                    scope: scope_label.to_string(),
                    path,
                });
            }
            Err(source) => return Err(FetchError::Io { path, source }),
        };
        Ok(serde_json::from_str(&content)?)
    }
}

/// Site configuration and content metadata for one build cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteSnapshot {
    /// Scope label the snapshot was fetched for. Not part of the payload.
    #[serde(skip)]
    pub scope: String,
    /// Key → value site configuration bag.
    #[serde(default, deserialize_with = "object_or_empty")]
    pub config: BTreeMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub bio: Option<String>,
    /// Remaining global entries, kept for the surrounding layout.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SiteSnapshot {
    /// Strip unrelated entries from `raw` and deserialize the rest.
    pub fn from_raw(scope_label: &str, raw: serde_json::Value) -> Result<Self, FetchError> {
        let serde_json::Value::Object(mut map) = raw else {
            return Err(FetchError::NotAnObject(scope_label.to_string()));
        };
        strip_unrelated(&mut map);
        let mut snapshot: SiteSnapshot = serde_json::from_value(serde_json::Value::Object(map))?;
        snapshot.scope = scope_label.to_string();
        Ok(snapshot)
    }

    /// Text of a configuration bag entry.
    ///
    /// Strings, numbers and booleans are settings; `null`, arrays and
    /// objects are not and read as missing.
    pub fn config_text(&self, key: &str) -> Option<String> {
        match self.config.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// A config bag that isn't an object (`null`, an array, a scalar) is empty.
fn object_or_empty<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Object(map) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    })
}

/// Only strings are text; anything else reads as absent.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Remove [`UNRELATED_FIELDS`] from a raw snapshot object. Idempotent.
pub fn strip_unrelated(map: &mut serde_json::Map<String, serde_json::Value>) {
    for field in UNRELATED_FIELDS {
        map.remove(*field);
    }
}

/// Fetch and strip the snapshot for `scope_label`.
pub fn fetch_snapshot(
    provider: &dyn DataProvider,
    scope_label: &str,
) -> Result<SiteSnapshot, FetchError> {
    let raw = provider.fetch(scope_label)?;
    SiteSnapshot::from_raw(scope_label, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn from_raw_drops_post() {
        let raw = json!({
            "author": "Ada",
            "post": { "title": "Unrelated" },
            "siteInfo": { "title": "Notes" }
        });
        let snapshot = SiteSnapshot::from_raw("about", raw).unwrap();
        assert_eq!(snapshot.author.as_deref(), Some("Ada"));
        assert!(!snapshot.extra.contains_key("post"));
        assert!(snapshot.extra.contains_key("siteInfo"));
        assert_eq!(snapshot.scope, "about");
    }

    #[test]
    fn strip_unrelated_is_idempotent() {
        let mut once = json!({ "post": 1, "config": {} })
            .as_object()
            .unwrap()
            .clone();
        strip_unrelated(&mut once);
        let mut twice = once.clone();
        strip_unrelated(&mut twice);
        assert_eq!(once, twice);
        assert!(!once.contains_key("post"));
    }

    #[test]
    fn from_raw_rejects_non_object() {
        let err = SiteSnapshot::from_raw("about", json!([1, 2])).unwrap_err();
        assert!(matches!(err, FetchError::NotAnObject(_)));
    }

    #[test]
    fn empty_object_is_a_valid_snapshot() {
        let snapshot = SiteSnapshot::from_raw("about", json!({})).unwrap();
        assert!(snapshot.config.is_empty());
        assert_eq!(snapshot.bio, None);
    }

    #[test]
    fn odd_config_bag_reads_as_empty() {
        for config in [json!(null), json!([]), json!("x"), json!(7)] {
            let snapshot =
                SiteSnapshot::from_raw("about", json!({ "config": config, "author": "Ada" }))
                    .unwrap();
            assert!(snapshot.config.is_empty());
            assert_eq!(snapshot.author.as_deref(), Some("Ada"));
        }
    }

    #[test]
    fn non_string_author_and_bio_are_absent() {
        let snapshot =
            SiteSnapshot::from_raw("about", json!({ "author": null, "bio": 42 })).unwrap();
        assert_eq!(snapshot.author, None);
        assert_eq!(snapshot.bio, None);

        let snapshot =
            SiteSnapshot::from_raw("about", json!({ "author": ["x"], "bio": { "t": 1 } }))
                .unwrap();
        assert_eq!(snapshot.author, None);
        assert_eq!(snapshot.bio, None);
    }

    #[test]
    fn config_text_renders_scalars_only() {
        let snapshot = SiteSnapshot::from_raw(
            "about",
            json!({ "config": {
                "S": "120",
                "N": 45,
                "B": true,
                "Z": null,
                "A": [1],
                "O": { "x": 1 }
            }}),
        )
        .unwrap();
        assert_eq!(snapshot.config_text("S").as_deref(), Some("120"));
        assert_eq!(snapshot.config_text("N").as_deref(), Some("45"));
        assert_eq!(snapshot.config_text("B").as_deref(), Some("true"));
        assert_eq!(snapshot.config_text("Z"), None);
        assert_eq!(snapshot.config_text("A"), None);
        assert_eq!(snapshot.config_text("O"), None);
        assert_eq!(snapshot.config_text("MISSING"), None);
    }

    #[test]
    fn file_provider_reads_scope_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("about.json"), r#"{"bio": "hi", "post": {}}"#).unwrap();
        let provider = FileProvider::new(tmp.path());
        let snapshot = fetch_snapshot(&provider, "about").unwrap();
        assert_eq!(snapshot.bio.as_deref(), Some("hi"));
        assert!(snapshot.extra.is_empty());
    }

    #[test]
    fn file_provider_missing_scope_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let provider = FileProvider::new(tmp.path());
        let err = fetch_snapshot(&provider, "about").unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
        assert!(err.to_string().contains("about"));
    }

    #[test]
    fn file_provider_invalid_json_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("about.json"), "{ not json").unwrap();
        let provider = FileProvider::new(tmp.path());
        assert!(matches!(
            fetch_snapshot(&provider, "about"),
            Err(FetchError::Json(_))
        ));
    }
}
