//! # About Press
//!
//! Build-time generator for a static site's "About" page. The page is
//! regenerated periodically (incremental static regeneration): each cycle
//! fetches a fresh site snapshot, resolves settings, composes the page from
//! a declarative content model and publishes one immutable HTML file along
//! with the interval after which the next cycle should run.
//!
//! # Architecture: One Cycle
//!
//! ```text
//! 1. Fetch     provider   →  SiteSnapshot   (once, unrelated fields stripped)
//! 2. Resolve   snapshot   →  settings       (override → snapshot → default)
//! 3. Compose   settings   →  RenderOutput   (page tree + HTML + interval)
//! 4. Publish   output     →  dist/          (atomic rename + manifest)
//! ```
//!
//! Steps 2 and 3 are pure functions of their inputs, so the same snapshot
//! and content always yield byte-identical HTML. Step 1 is the only place a
//! cycle can fail; when it does, whatever was published before stays.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`snapshot`] | Data provider seam, `SiteSnapshot`, stripping of unrelated entries |
//! | [`resolve`] | Ordered setting lookup with an explicit absent sentinel |
//! | [`revalidate`] | Three-tier regeneration interval policy |
//! | [`content`] | Declarative tags, skills, cards and prose; `content.toml` loading |
//! | [`compose`] | Region builders and maud rendering |
//! | [`cycle`] | Fetch → compose → publish, stale-while-revalidate |
//! | [`config`] | `config.toml` loading, validation, theme CSS |
//! | [`output`] | CLI output formatting |
//!
//! # Content Layout
//!
//! ```text
//! content/
//! ├── config.toml        # Page settings (optional)
//! ├── content.toml       # Tags, skills, cards, prose (optional, stock otherwise)
//! ├── data/
//! │   └── about.json     # Site snapshot for the `about` scope
//! └── assets/            # Copied to the output root (avatar, icons)
//! ```

pub mod compose;
pub mod config;
pub mod content;
pub mod cycle;
pub mod output;
pub mod resolve;
pub mod revalidate;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_helpers;
