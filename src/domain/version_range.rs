//! npm style version ranges
//!
//! Handles the range syntax found in `engines`, `packageManager`, `.nvmrc`
//! and user constraints:
//! - Exact: `8.1.0`, `v18.16.0`
//! - Partial: `8`, `8.1`, `8.x`, `*`
//! - Comparison: `<7`, `>=3 <8`, `>= 16`
//! - Caret and tilde: `^8.6.0`, `~8.6`
//! - Hyphen: `16 - 18`
//! - Alternatives: `^16 || ^18`
//!
//! Each alternative is translated into a [`semver::VersionReq`]. Ranges that
//! cannot be translated (dist-tags, aliases like `lts/*`) are rejected.

use regex::Regex;
use semver::{Version, VersionReq};
use std::fmt;
use std::sync::LazyLock;

static COMPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(>=|<=|>|<|=|\^|~)?v?(\d+|[xX*])(?:\.(\d+|[xX*]))?(?:\.(\d+|[xX*]))?(-[0-9A-Za-z.\-]+)?(?:\+[0-9A-Za-z.\-]+)?$",
    )
    .unwrap()
});
static OPERATOR_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(>=|<=|>|<|=|\^|~)\s+").unwrap());
static LOOSE_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(-[0-9A-Za-z.\-]+)?(?:\+[0-9A-Za-z.\-]+)?$")
        .unwrap()
});

/// A parsed version range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    raw: String,
    alternatives: Vec<VersionReq>,
}

impl VersionRange {
    /// Parses an npm style range, returning `None` if it cannot be understood
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let alternatives = trimmed
            .split("||")
            .map(translate_alternative)
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            raw: trimmed.to_string(),
            alternatives,
        })
    }

    /// Returns true if `range` parses
    pub fn is_valid(range: &str) -> bool {
        Self::parse(range).is_some()
    }

    /// Returns true if any alternative accepts the version
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Parses loosely formatted tool output such as `v18.16.0` or `8.6`
pub fn parse_loose_version(s: &str) -> Option<Version> {
    let caps = LOOSE_VERSION_RE.captures(s.trim())?;
    let major = caps.get(1)?.as_str();
    let minor = caps.get(2).map_or("0", |m| m.as_str());
    let patch = caps.get(3).map_or("0", |m| m.as_str());
    let pre = caps.get(4).map_or("", |m| m.as_str());
    Version::parse(&format!("{}.{}.{}{}", major, minor, patch, pre)).ok()
}

fn translate_alternative(alternative: &str) -> Option<VersionReq> {
    let alternative = alternative.trim();
    if alternative.is_empty() {
        return Some(VersionReq::STAR);
    }

    if let Some((low, high)) = alternative.split_once(" - ") {
        let low = translate_comparator(&format!(">={}", low.trim()))?;
        let high = translate_comparator(&format!("<={}", high.trim()))?;
        return VersionReq::parse(&format!("{}, {}", low, high)).ok();
    }

    let normalized = OPERATOR_SPACE_RE.replace_all(alternative, "$1");
    let comparators = normalized
        .split_whitespace()
        .map(translate_comparator)
        .collect::<Option<Vec<_>>>()?;

    VersionReq::parse(&comparators.join(", ")).ok()
}

fn translate_comparator(token: &str) -> Option<String> {
    let caps = COMPARATOR_RE.captures(token)?;
    let op = caps.get(1).map(|m| m.as_str());

    // Wildcard components end the version: `8.x.1` means `8.x`
    let mut parts = Vec::new();
    for idx in 2..=4 {
        match caps.get(idx).map(|m| m.as_str()) {
            Some(part) if part.chars().all(|c| c.is_ascii_digit()) => parts.push(part),
            _ => break,
        }
    }

    if parts.is_empty() {
        return match op {
            None | Some("=") | Some(">=") | Some("<=") | Some("^") | Some("~") => {
                Some("*".to_string())
            }
            // `<*` and `>*` match nothing in npm
            _ => None,
        };
    }

    let mut version = parts.join(".");
    if parts.len() == 3 {
        if let Some(pre) = caps.get(5) {
            version.push_str(pre.as_str());
        }
    }

    // A bare version is exact in npm but caret in semver
    let op = op.unwrap_or("=");
    Some(format!("{}{}", op, version))
}
