//! One regeneration cycle: fetch, compose, publish.
//!
//! ```text
//! provider ──fetch──▶ SiteSnapshot ──compose──▶ RenderOutput ──publish──▶ dist/
//! ```
//!
//! # Stale-while-revalidate
//!
//! The published page is only ever replaced by a fully composed one.
//! `about.html` is written to a temporary file next to its final location
//! and renamed into place, so a reader sees either the previous page or the
//! new one, never a partial write.
//!
//! If the upstream fetch fails, nothing is composed or written. When a page
//! from an earlier cycle is already published, the cycle reports
//! [`CycleOutcome::Stale`] and that page keeps being served. Only a failure
//! with nothing published is a hard error ([`CycleError::Upstream`]).
//!
//! # Render manifest
//!
//! After the HTML is in place, `.render-manifest.json` records the scope, the
//! SHA-256 of the page and the revalidation interval the hosting platform
//! should honor before triggering the next cycle. Comparing hashes tells
//! whether a cycle actually changed the page.

use crate::compose::{self, RenderOutput};
use crate::config::SiteConfig;
use crate::content::ContentModel;
use crate::resolve::{Overrides, ScopeContext};
use crate::snapshot::{self, DataProvider, FetchError};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Published page, relative to the output directory.
pub const PAGE_FILENAME: &str = "about.html";

/// Name of the render manifest within the output directory.
const MANIFEST_FILENAME: &str = ".render-manifest.json";

/// Bump to make older manifests unreadable (treated as absent).
const MANIFEST_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum CycleError {
    #[error("upstream fetch failed and no page is published yet: {0}")]
    Upstream(#[source] FetchError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metadata written next to the published page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderManifest {
    pub version: u32,
    pub scope: String,
    pub content_hash: String,
    /// Seconds until the next cycle should run.
    pub revalidate: u32,
}

impl RenderManifest {
    /// Load from the output directory. Returns `None` if the file doesn't
    /// exist or can't be parsed (version mismatch, corruption).
    pub fn load(output_dir: &Path) -> Option<Self> {
        let content = fs::read_to_string(output_dir.join(MANIFEST_FILENAME)).ok()?;
        let manifest: Self = serde_json::from_str(&content).ok()?;
        (manifest.version == MANIFEST_VERSION).then_some(manifest)
    }

    pub fn save(&self, output_dir: &Path) -> Result<(), CycleError> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(&output_dir.join(MANIFEST_FILENAME), json.as_bytes())?;
        Ok(())
    }
}

/// SHA-256 of the rendered page, as a hex string.
pub fn hash_html(html: &str) -> String {
    format!("{:x}", Sha256::digest(html.as_bytes()))
}

/// Inputs of one cycle that don't come from the provider.
#[derive(Debug, Clone, Copy)]
pub struct CycleRequest<'a> {
    pub scope_label: &'a str,
    pub overrides: &'a Overrides,
    pub site: &'a SiteConfig,
    pub content: &'a ContentModel,
    /// Content root; `assets/` below it is copied to the output.
    pub source_dir: &'a Path,
    pub output_dir: &'a Path,
}

#[derive(Debug)]
pub enum CycleOutcome {
    /// A freshly composed page was published.
    Published {
        output: Box<RenderOutput>,
        /// False when the new page is byte-identical to the previous one.
        changed: bool,
        assets_copied: usize,
    },
    /// Upstream failed; the previously published page stays in place.
    Stale {
        error: FetchError,
        /// Manifest of the served page, if it is still readable.
        previous: Option<RenderManifest>,
    },
}

/// Fetch the snapshot and compose the page without publishing anything.
pub fn compose_once(
    provider: &dyn DataProvider,
    request: &CycleRequest<'_>,
) -> Result<RenderOutput, FetchError> {
    let snapshot = snapshot::fetch_snapshot(provider, request.scope_label)?;
    let scope = ScopeContext {
        overrides: request.overrides,
        snapshot: &snapshot,
        site: request.site,
    };
    Ok(compose::compose(&scope, request.content))
}

/// Run one full cycle and publish the result.
pub fn run_cycle(
    provider: &dyn DataProvider,
    request: &CycleRequest<'_>,
) -> Result<CycleOutcome, CycleError> {
    let published = request.output_dir.join(PAGE_FILENAME).exists();
    let previous = RenderManifest::load(request.output_dir).filter(|_| published);

    let output = match compose_once(provider, request) {
        Ok(output) => output,
        Err(error) if published => return Ok(CycleOutcome::Stale { error, previous }),
        Err(error) => return Err(CycleError::Upstream(error)),
    };

    fs::create_dir_all(request.output_dir)?;
    let assets_copied = copy_assets(&request.source_dir.join("assets"), request.output_dir)?;

    let content_hash = hash_html(&output.html);
    let changed = previous
        .as_ref()
        .is_none_or(|p| p.content_hash != content_hash);
    if changed {
        write_atomic(
            &request.output_dir.join(PAGE_FILENAME),
            output.html.as_bytes(),
        )?;
    }

    RenderManifest {
        version: MANIFEST_VERSION,
        scope: request.scope_label.to_string(),
        content_hash,
        revalidate: output.interval.interval.seconds(),
    }
    .save(request.output_dir)?;

    Ok(CycleOutcome::Published {
        output: Box::new(output),
        changed,
        assets_copied,
    })
}

/// Write via a sibling temp file and rename over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp = PathBuf::from(path);
    let name = path
        .file_name()
        .map(|n| format!(".{}.tmp", n.to_string_lossy()))
        .unwrap_or_else(|| ".tmp".to_string());
    tmp.set_file_name(name);
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

/// Copy static assets (avatar, icons) into the output directory.
///
/// Returns the number of files copied. A missing assets directory is not an
/// error.
fn copy_assets(assets_dir: &Path, output_dir: &Path) -> io::Result<usize> {
    if !assets_dir.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(assets_dir).min_depth(1) {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(assets_dir)
            .map_err(io::Error::other)?;
        let target = output_dir.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
