//! Release ordering
//!
//! Releases are ordered either by the version extracted from their tag or by
//! their effective timestamp. Both orderings are applied with a stable sort
//! so co-equal releases keep their fetch order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::version::error::ConfigError;
use crate::version::extractor::VersionExtractor;
use crate::version::loose::LooseVersion;
use crate::version::types::{Cursor, RawRelease};

/// Ordering mode selected by the source configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderBy {
    #[default]
    Version,
    Time,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Version => "version",
            OrderBy::Time => "time",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "version" => Ok(OrderBy::Version),
            "time" => Ok(OrderBy::Time),
            other => Err(ConfigError::InvalidOrderBy(other.to_string())),
        }
    }
}

/// Position of a release (or cursor) in the active ordering
///
/// `None` sorts first: an unparsable version before every parsable one, and
/// a missing timestamp (the zero instant) before every real one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Version(Option<LooseVersion>),
    Time(Option<DateTime<Utc>>),
}

/// Orders releases according to an [`OrderBy`] mode
#[derive(Debug, Clone)]
pub struct Comparator {
    order_by: OrderBy,
    extractor: VersionExtractor,
}

impl Comparator {
    pub fn new(order_by: OrderBy, extractor: VersionExtractor) -> Self {
        Self {
            order_by,
            extractor,
        }
    }

    pub fn order_by(&self) -> OrderBy {
        self.order_by
    }

    /// Compute the sort key of a release
    pub fn key(&self, release: &RawRelease) -> SortKey {
        match self.order_by {
            OrderBy::Version => SortKey::Version(
                release
                    .tag()
                    .and_then(|tag| LooseVersion::parse(&self.extractor.extract(tag)).ok()),
            ),
            OrderBy::Time => SortKey::Time(release.timestamp()),
        }
    }

    /// Compute the sort key of a cursor, if it carries what the mode needs
    pub fn cursor_key(&self, cursor: &Cursor) -> Option<SortKey> {
        match self.order_by {
            OrderBy::Version => {
                let version = LooseVersion::parse(&self.extractor.extract(cursor.tag()?)).ok()?;
                Some(SortKey::Version(Some(version)))
            }
            OrderBy::Time => cursor.timestamp().map(|ts| SortKey::Time(Some(ts))),
        }
    }

    pub fn compare(&self, a: &RawRelease, b: &RawRelease) -> Ordering {
        self.key(a).cmp(&self.key(b))
    }

    /// Stable ascending sort
    pub fn sort(&self, releases: &mut [RawRelease]) {
        releases.sort_by_cached_key(|release| self.key(release));
    }
}
