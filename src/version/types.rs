//! Common types shared by the release listing, filtering and cursor logic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire form of a missing timestamp
pub const ZERO_INSTANT: &str = "0001-01-01T00:00:00Z";

/// Unix seconds of [`ZERO_INSTANT`]
const ZERO_INSTANT_SECS: i64 = -62_135_596_800;

pub fn is_zero_instant(ts: &DateTime<Utc>) -> bool {
    ts.timestamp() == ZERO_INSTANT_SECS && ts.timestamp_subsec_nanos() == 0
}

/// `None` on our side is the zero instant on the wire, in both directions
mod zero_instant {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{ZERO_INSTANT, is_zero_instant};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => ts.serialize(serializer),
            None => serializer.serialize_str(ZERO_INSTANT),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
        Ok(value.filter(|ts| !is_zero_instant(ts)))
    }
}

/// A release as reported by the hosting service
///
/// Read-only input to the resolution engine. `tag` may be absent or empty
/// for drafts that were never published.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRelease {
    pub id: u64,
    #[serde(rename = "tag_name", default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl RawRelease {
    /// Returns the tag if present and non-empty
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }

    /// Effective timestamp used for time ordering: published, then created
    ///
    /// `None` is the zero instant and orders before every real timestamp.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.published_at.or(self.created_at)
    }

    /// Drafts and pre-releases may be retagged, so the id identifies them
    pub fn is_unstable(&self) -> bool {
        self.draft || self.prerelease
    }
}

/// The caller's last known position
///
/// All fields empty is the first-run sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cursor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "zero_instant::deserialize"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Cursor {
    pub fn from_tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            ..Self::default()
        }
    }

    pub fn from_id(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|i| !i.is_empty())
    }

    /// Returns the timestamp unless it is the zero instant
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp.filter(|ts| !is_zero_instant(ts))
    }

    /// True when the caller has never seen a version
    pub fn is_empty(&self) -> bool {
        self.tag().is_none() && self.id().is_none() && self.timestamp().is_none()
    }

    /// Whether this cursor names the given release
    ///
    /// When both sides carry a tag, only the tags are compared. Otherwise
    /// drafts and pre-releases are identified by their release id.
    pub fn matches(&self, release: &RawRelease) -> bool {
        if let (Some(cursor_tag), Some(tag)) = (self.tag(), release.tag()) {
            return cursor_tag == tag;
        }

        release.is_unstable() && self.id().is_some_and(|id| id == release.id.to_string())
    }
}

impl From<VersionIdentity> for Cursor {
    fn from(identity: VersionIdentity) -> Self {
        Self {
            tag: Some(identity.tag).filter(|t| !t.is_empty()),
            id: Some(identity.id),
            timestamp: identity.timestamp,
        }
    }
}

/// Externally visible identity of a release, emitted in ascending order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionIdentity {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
    pub id: String,
    #[serde(default, with = "zero_instant")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<&RawRelease> for VersionIdentity {
    fn from(release: &RawRelease) -> Self {
        Self {
            tag: release.tag().unwrap_or_default().to_string(),
            id: release.id.to_string(),
            timestamp: release.timestamp(),
        }
    }
}
