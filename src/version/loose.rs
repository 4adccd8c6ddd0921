//! Loosely semantic versions
//!
//! Tags in the wild rarely follow semver exactly: `1`, `2.0`, `1.4.0.2`,
//! `3.0-rc.1` and `1.0.0-beta2+build.5` all need a stable order. A loose
//! version is a dotted release segment with optional pre-release (`-`) and
//! post-release (`+`) segments.
//!
//! Ordering rules:
//! - components compare numerically when both are numbers, lexically when
//!   both are text, and numbers sort before text
//! - missing trailing components count as `0`, so `1` == `1.0.0`
//! - a pre-release sorts before the same release without one
//! - a post-release sorts after the same release without one

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Component {
    Num(u64),
    Text(String),
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Component::Num(a), Component::Num(b)) => a.cmp(b),
            (Component::Text(a), Component::Text(b)) => a.cmp(b),
            (Component::Num(_), Component::Text(_)) => Ordering::Less,
            (Component::Text(_), Component::Num(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Num(n) => write!(f, "{}", n),
            Component::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone)]
struct Segment(Vec<Component>);

static ZERO: Component = Component::Num(0);

impl Segment {
    /// Parse a release segment: dot separated, each piece alphanumeric
    fn parse_release(s: &str) -> Option<Self> {
        s.split('.').map(parse_component).collect::<Option<_>>().map(Segment)
    }

    /// Parse a pre/post segment: `.` and `-` separate pieces, and letter/digit
    /// boundaries split further so `rc10` orders after `rc9`
    fn parse_label(s: &str) -> Option<Self> {
        let mut components = Vec::new();
        for piece in s.split(['.', '-']) {
            if piece.is_empty() || !piece.chars().all(is_component_char) {
                return None;
            }
            for run in split_runs(piece) {
                components.push(parse_component(run)?);
            }
        }
        Some(Segment(components))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        (0..len)
            .map(|i| {
                let a = self.0.get(i).unwrap_or(&ZERO);
                let b = other.0.get(i).unwrap_or(&ZERO);
                a.cmp(b)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}

/// A version that tolerates non-semver shapes
///
/// Equality follows the ordering, so `1.0` and `1.0.0` are equal.
#[derive(Debug, Clone)]
pub struct LooseVersion {
    release: Segment,
    pre_release: Option<Segment>,
    post_release: Option<Segment>,
}

/// Error returned when a string is not a loose version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLooseVersionError(String);

impl fmt::Display for ParseLooseVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a version: {:?}", self.0)
    }
}

impl std::error::Error for ParseLooseVersionError {}

impl LooseVersion {
    pub fn parse(s: &str) -> Result<Self, ParseLooseVersionError> {
        let err = || ParseLooseVersionError(s.to_string());

        let (main, post) = match s.split_once('+') {
            Some((main, post)) => (main, Some(post)),
            None => (s, None),
        };
        let (release, pre) = match main.split_once('-') {
            Some((release, pre)) => (release, Some(pre)),
            None => (main, None),
        };

        let release = Segment::parse_release(release).ok_or_else(err)?;
        let pre_release = pre
            .map(|p| Segment::parse_label(p).ok_or_else(err))
            .transpose()?;
        let post_release = post
            .map(|p| Segment::parse_label(p).ok_or_else(err))
            .transpose()?;

        Ok(Self {
            release,
            pre_release,
            post_release,
        })
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }
}

impl FromStr for LooseVersion {
    type Err = ParseLooseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for LooseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.release
            .cmp(&other.release)
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
            .then_with(|| match (&self.post_release, &other.post_release) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for LooseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LooseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for LooseVersion {}

impl fmt::Display for LooseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.release)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{}", pre)?;
        }
        if let Some(post) = &self.post_release {
            write!(f, "+{}", post)?;
        }
        Ok(())
    }
}

fn is_component_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn parse_component(s: &str) -> Option<Component> {
    if s.is_empty() || !s.chars().all(is_component_char) {
        return None;
    }
    if s.chars().all(|c| c.is_ascii_digit()) {
        s.parse().ok().map(Component::Num)
    } else {
        Some(Component::Text(s.to_string()))
    }
}

/// Split `rc10` into `rc` and `10`
fn split_runs(s: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut prev_digit: Option<bool> = None;
    for (i, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        if prev_digit.is_some_and(|p| p != digit) {
            runs.push(&s[start..i]);
            start = i;
        }
        prev_digit = Some(digit);
    }
    runs.push(&s[start..]);
    runs
}
