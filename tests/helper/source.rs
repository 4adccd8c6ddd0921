//! Release source test utilities

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use release_resource::check::CheckCommand;
use release_resource::config::{CheckRequest, Source};
use release_resource::version::error::{CheckError, SourceError};
use release_resource::version::source::ReleaseSource;
use release_resource::version::types::{Cursor, RawRelease, VersionIdentity};

/// Release source returning a fixed snapshot
pub struct FixedSource {
    releases: Vec<RawRelease>,
}

impl FixedSource {
    pub fn new(releases: Vec<RawRelease>) -> Self {
        Self { releases }
    }
}

#[async_trait]
impl ReleaseSource for FixedSource {
    async fn fetch_releases(&self) -> Result<Vec<RawRelease>, SourceError> {
        Ok(self.releases.clone())
    }
}

/// Builder for releases as the host would report them
pub struct ReleaseBuilder {
    release: RawRelease,
}

impl ReleaseBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            release: RawRelease {
                id,
                tag: None,
                draft: false,
                prerelease: false,
                created_at: None,
                published_at: None,
            },
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.release.tag = Some(tag.to_string());
        self
    }

    pub fn draft(mut self) -> Self {
        self.release.draft = true;
        self
    }

    pub fn prerelease(mut self) -> Self {
        self.release.prerelease = true;
        self
    }

    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.release.created_at = Some(at);
        self
    }

    pub fn published(mut self, at: DateTime<Utc>) -> Self {
        self.release.published_at = Some(at);
        self
    }

    pub fn build(self) -> RawRelease {
        self.release
    }
}

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
}

/// Run a check over a fixed snapshot
pub async fn check(
    releases: Vec<RawRelease>,
    source: Source,
    version: Cursor,
) -> Result<Vec<VersionIdentity>, CheckError> {
    let command = CheckCommand::new(Arc::new(FixedSource::new(releases)));
    command.run(&CheckRequest { source, version }).await
}
