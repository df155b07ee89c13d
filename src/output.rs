//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! ## Build
//!
//! ```text
//! About → about.html
//!     Author: Ada
//!     Bio: placeholder
//!     Hero tags: 6 of 8
//!     Skills: 8 + more
//!     Cards: 2, sections: 2
//!     Revalidate: 120s (override)
//! Page updated (3 assets)
//! ```
//!
//! ## Stale
//!
//! ```text
//! Upstream fetch failed: No snapshot for scope 'about' at content/data/about.json
//! Serving previous page (revalidate 60s, sha256 1f2e3d4c5b6a)
//! ```

use crate::compose::{RenderOutput, SkillTile};
use crate::cycle::{CycleOutcome, PAGE_FILENAME};
use crate::revalidate::IntervalDecision;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Shorten a hex digest for display.
fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}

fn format_interval(decision: &IntervalDecision) -> String {
    format!("{} ({})", decision.interval, decision.tier)
}

/// Summary of a composed page, one fact per line.
pub fn format_render(output: &RenderOutput) -> Vec<String> {
    let page = &output.page;
    let skills = page
        .skills
        .iter()
        .filter(|t| matches!(t, SkillTile::Skill(_)))
        .count();

    let mut lines = vec![format!("{} → {}", page.title, PAGE_FILENAME)];
    lines.push(format!("{}Author: {}", indent(1), page.intro.author));
    if page.intro.bio_is_placeholder {
        lines.push(format!("{}Bio: placeholder", indent(1)));
    } else {
        lines.push(format!("{}Bio: {} chars", indent(1), page.intro.bio.chars().count()));
    }
    lines.push(format!(
        "{}Hero tags: {} of {}",
        indent(1),
        page.hero.tags.len(),
        page.hero.total_tags
    ));
    lines.push(format!("{}Skills: {} + more", indent(1), skills));
    lines.push(format!(
        "{}Cards: {}, sections: {}",
        indent(1),
        page.cards.len(),
        page.sections.len()
    ));
    lines.push(format!(
        "{}Revalidate: {}",
        indent(1),
        format_interval(&output.interval)
    ));
    lines
}

/// Result of a build cycle.
pub fn format_cycle(outcome: &CycleOutcome) -> Vec<String> {
    match outcome {
        CycleOutcome::Published {
            output,
            changed,
            assets_copied,
        } => {
            let mut lines = format_render(output);
            let status = if *changed { "updated" } else { "unchanged" };
            lines.push(format!("Page {} ({} assets)", status, assets_copied));
            lines
        }
        CycleOutcome::Stale { error, previous } => vec![
            format!("Upstream fetch failed: {}", error),
            match previous {
                Some(previous) => format!(
                    "Serving previous page (revalidate {}s, sha256 {})",
                    previous.revalidate,
                    short_hash(&previous.content_hash)
                ),
                None => "Serving previous page (no render manifest)".to_string(),
            },
        ],
    }
}

pub fn format_interval_report(decision: &IntervalDecision) -> Vec<String> {
    vec![
        format!("Revalidate: {}", format_interval(decision)),
        format!("{}seconds = {}", indent(1), decision.interval.seconds()),
    ]
}

pub fn print_render(output: &RenderOutput) {
    for line in format_render(output) {
        println!("{}", line);
    }
}

pub fn print_cycle(outcome: &CycleOutcome) {
    for line in format_cycle(outcome) {
        println!("{}", line);
    }
}

pub fn print_interval_report(decision: &IntervalDecision) {
    for line in format_interval_report(decision) {
        println!("{}", line);
    }
}
