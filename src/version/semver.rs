//! Strict semver parsing and range constraints
//!
//! Constraints accept the usual range syntax:
//! - `1.2.3`, `=1.2.3` - exact match
//! - `^1.2.3`, `~1.2.3` - caret and tilde ranges
//! - `>=1.2.3 <2.0.0` or `>=1.2.3, <2.0.0` - all comparators must hold
//! - `0.1.x`, `1.*`, `*` - wildcards
//! - `^1.0.0 || ^2.0.0` - any alternative may hold

use semver::{Version, VersionReq};

use crate::version::error::ConfigError;

/// Operators that may be written apart from their version (`>= 1.2.3`)
const OPERATORS: &[&str] = &["=", ">", ">=", "<", "<=", "~", "^"];

/// Parse a version string strictly as semver (`MAJOR.MINOR.PATCH[-PRE][+BUILD]`)
pub fn parse_strict(version: &str) -> Option<Version> {
    Version::parse(version).ok()
}

/// A parsed semver range constraint
#[derive(Debug, Clone)]
pub struct Constraint {
    alternatives: Vec<VersionReq>,
}

impl Constraint {
    /// Parse a constraint expression
    pub fn parse(constraint: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidConstraint {
            constraint: constraint.to_string(),
            reason,
        };

        if constraint.trim().is_empty() {
            return Err(invalid("empty constraint".to_string()));
        }

        let alternatives = constraint
            .split("||")
            .map(|alternative| {
                let normalized = normalize_comparators(alternative);
                if normalized.is_empty() {
                    return Err(invalid("empty alternative".to_string()));
                }
                VersionReq::parse(&normalized).map_err(|e| invalid(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { alternatives })
    }

    /// Check if a version satisfies any alternative
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }
}

/// Rewrite whitespace separated comparators into the comma separated form
///
/// `>= 1.0.0 < 2.0.0` becomes `>=1.0.0, <2.0.0`.
fn normalize_comparators(alternative: &str) -> String {
    let mut comparators: Vec<String> = Vec::new();
    let mut pending_op: Option<&str> = None;

    for token in alternative
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if OPERATORS.contains(&token) {
            pending_op = Some(token);
            continue;
        }
        match pending_op.take() {
            Some(op) => comparators.push(format!("{}{}", op, token)),
            None => comparators.push(token.to_string()),
        }
    }
    // A dangling operator is left in place so the parser reports it
    if let Some(op) = pending_op {
        comparators.push(op.to_string());
    }

    comparators.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.3", true)]
    #[case("1.2.3-rc.1", true)]
    #[case("1.2.3+build.5", true)]
    #[case("1.2", false)]
    #[case("v1.2.3", false)]
    #[case("abc", false)]
    #[case("", false)]
    fn parse_strict_accepts_only_full_semver(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(parse_strict(input).is_some(), expected);
    }

    #[rstest]
    #[case(">= 1.0.0 < 2.0.0", ">=1.0.0, <2.0.0")]
    #[case(">=1.0.0, <2.0.0", ">=1.0.0, <2.0.0")]
    #[case("0.1.x", "0.1.x")]
    #[case("  ^1.2  ", "^1.2")]
    fn normalize_comparators_joins_with_commas(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_comparators(input), expected);
    }

    #[rstest]
    #[case("0.1.x", "0.1.0", true)]
    #[case("0.1.x", "0.1.9", true)]
    #[case("0.1.x", "0.2.0", false)]
    #[case(">= 1.0.0 < 2.0.0", "1.5.0", true)]
    #[case(">= 1.0.0 < 2.0.0", "2.0.0", false)]
    #[case("^1.0.0 || ^3.0.0", "3.1.0", true)]
    #[case("^1.0.0 || ^3.0.0", "2.1.0", false)]
    #[case("~1.2.3", "1.2.9", true)]
    #[case("~1.2.3", "1.3.0", false)]
    #[case("*", "9.9.9", true)]
    fn constraint_matches(#[case] constraint: &str, #[case] version: &str, #[case] expected: bool) {
        let constraint = Constraint::parse(constraint).unwrap();
        let version = Version::parse(version).unwrap();
        assert_eq!(constraint.matches(&version), expected);
    }

    #[rstest]
    #[case("")]
    #[case("not a range")]
    #[case(">=")]
    #[case("^1.0.0 ||")]
    fn invalid_constraint_is_config_error(#[case] constraint: &str) {
        assert!(matches!(
            Constraint::parse(constraint),
            Err(ConfigError::InvalidConstraint { .. })
        ));
    }
}
