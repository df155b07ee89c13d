//! Regeneration interval policy.
//!
//! The interval is taken from the first tier that yields a positive integer:
//!
//! 1. `REVALIDATE_SECONDS` resolved for the scope (override → snapshot → default)
//! 2. `revalidate.default_seconds` from `config.toml`
//! 3. [`FALLBACK_SECONDS`]
//!
//! A value is read like a leading integer: surrounding text after the digits
//! is ignored, so `"30s"` is 30 and `"1.5"` is 1. A value with no leading
//! digits, or one that is zero, negative or larger than `u32::MAX`, is
//! unusable and falls through. The policy never fails.

use crate::resolve::{self, Origin, ScopeContext};
use serde::Serialize;
use std::fmt;
use std::num::NonZeroU32;

/// Last-resort interval in seconds.
pub const FALLBACK_SECONDS: u32 = 60;

const FALLBACK: NonZeroU32 = NonZeroU32::new(FALLBACK_SECONDS).unwrap();

/// Positive number of seconds until the next regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RevalidationInterval(NonZeroU32);

impl RevalidationInterval {
    pub fn seconds(self) -> u32 {
        self.0.get()
    }

    pub fn fallback() -> Self {
        Self(FALLBACK)
    }
}

impl fmt::Display for RevalidationInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Which tier produced the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalTier {
    Scope(Origin),
    SiteDefault,
    Fallback,
}

impl fmt::Display for IntervalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalTier::Scope(origin) => write!(f, "{origin}"),
            IntervalTier::SiteDefault => write!(f, "site default"),
            IntervalTier::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalDecision {
    pub interval: RevalidationInterval,
    pub tier: IntervalTier,
}

/// Parse the leading integer of a raw setting as a positive number of seconds.
///
/// Leading whitespace and a sign are accepted; parsing stops at the first
/// non-digit.
pub fn parse_seconds(raw: &str) -> Option<RevalidationInterval> {
    let text = raw.trim_start();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if negative || digits.is_empty() {
        return None;
    }
    let n: u32 = digits.parse().ok()?;
    NonZeroU32::new(n).map(RevalidationInterval)
}

/// Compute the regeneration interval for this scope.
pub fn compute_interval(scope: &ScopeContext<'_>) -> IntervalDecision {
    let scoped = resolve::resolve(resolve::REVALIDATE_SECONDS, scope);
    if let (Some(raw), Some(origin)) = (scoped.as_deref(), scoped.origin())
        && let Some(interval) = parse_seconds(raw)
    {
        return IntervalDecision {
            interval,
            tier: IntervalTier::Scope(origin),
        };
    }

    if let Some(raw) = &scope.site.revalidate.default_seconds
        && let Some(interval) = parse_seconds(&raw.to_text())
    {
        return IntervalDecision {
            interval,
            tier: IntervalTier::SiteDefault,
        };
    }

    IntervalDecision {
        interval: RevalidationInterval::fallback(),
        tier: IntervalTier::Fallback,
    }
}
