//! Tag to version extraction
//!
//! Release tags are free-form (`v1.2.3`, `release-1.2.3`, `pkg@1.2.3`). The
//! extractor turns a tag into the string that version parsing and ordering
//! operate on. An empty result means the tag carries no usable version.

use regex::Regex;

use crate::version::error::ConfigError;

/// Prefixes stripped from a full match when a capture group looks implausible
const KNOWN_PREFIXES: &[&str] = &[
    "production-",
    "version-",
    "release-",
    "stable-",
    "final-",
    "prod-",
    "rel-",
    "v",
    "r",
    "@",
];

/// How a tag is turned into a comparable version
#[derive(Debug, Clone)]
pub enum VersionRule {
    /// Drop a single leading `v` when it is followed by a digit
    Default,
    /// User supplied expression, compiled once per invocation
    Regex { pattern: Regex, use_capture: bool },
}

impl VersionRule {
    /// Build a rule from an optional user pattern
    ///
    /// The capture group, if the expression has one, is preferred over the
    /// whole match.
    pub fn from_pattern(pattern: Option<&str>) -> Result<Self, ConfigError> {
        let Some(pattern) = pattern.filter(|p| !p.is_empty()) else {
            return Ok(VersionRule::Default);
        };

        let compiled = Regex::new(pattern).map_err(|source| ConfigError::InvalidTagFilter {
            pattern: pattern.to_string(),
            source,
        })?;
        // captures_len counts the implicit whole-match group
        let use_capture = compiled.captures_len() > 1;

        Ok(VersionRule::Regex {
            pattern: compiled,
            use_capture,
        })
    }
}

/// Applies a [`VersionRule`] to tags
#[derive(Debug, Clone)]
pub struct VersionExtractor {
    rule: VersionRule,
}

impl VersionExtractor {
    pub fn new(rule: VersionRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &VersionRule {
        &self.rule
    }

    /// Extract the version string from a tag, empty when nothing matches
    pub fn extract(&self, tag: &str) -> String {
        match &self.rule {
            VersionRule::Default => strip_v_prefix(tag).to_string(),
            VersionRule::Regex {
                pattern,
                use_capture,
            } => {
                let Some(caps) = pattern.captures(tag) else {
                    return String::new();
                };
                let full = caps.get(0).map_or("", |m| m.as_str());
                if !use_capture {
                    return full.to_string();
                }

                // Last participating group wins
                let captured = (1..caps.len()).rev().find_map(|i| caps.get(i));
                match captured {
                    Some(m) if is_plausible_capture(m.as_str()) => m.as_str().to_string(),
                    _ => strip_known_prefix(full).to_string(),
                }
            }
        }
    }
}

impl Default for VersionExtractor {
    fn default() -> Self {
        Self::new(VersionRule::Default)
    }
}

/// A captured group shorter than three characters with no dot is treated as
/// a fragment of the version rather than the version itself.
pub fn is_plausible_capture(captured: &str) -> bool {
    captured.len() >= 3 || captured.contains('.')
}

fn strip_v_prefix(tag: &str) -> &str {
    match tag.strip_prefix('v') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => tag,
    }
}

fn strip_known_prefix(s: &str) -> &str {
    KNOWN_PREFIXES
        .iter()
        .find_map(|prefix| s.strip_prefix(prefix))
        .unwrap_or(s)
}
