//! Check command: fetch, filter, sort and resolve
//!
//! Everything configuration-derived (compiled tag filter, semver constraint,
//! ordering mode) lives in a [`CheckContext`] built once per invocation and
//! passed explicitly to each stage.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{CheckRequest, Source};
use crate::version::classifier::{FilterConfig, ReleaseFilter};
use crate::version::comparator::Comparator;
use crate::version::cursor::CursorResolver;
use crate::version::error::{CheckError, ConfigError};
use crate::version::source::ReleaseSource;
use crate::version::sources::GitHubReleases;
use crate::version::types::{Cursor, RawRelease, VersionIdentity};

/// Per-invocation state derived from the source configuration
#[derive(Debug, Clone)]
pub struct CheckContext {
    filter: ReleaseFilter,
    comparator: Comparator,
}

impl CheckContext {
    /// Compile the configuration; fails before any release is fetched
    pub fn new(config: &FilterConfig) -> Result<Self, ConfigError> {
        let filter = ReleaseFilter::new(config)?;
        let comparator = Comparator::new(config.order_by, filter.extractor().clone());
        Ok(Self { filter, comparator })
    }

    /// Pure resolution over an in-memory snapshot of releases
    pub fn resolve(&self, releases: Vec<RawRelease>, cursor: &Cursor) -> Vec<VersionIdentity> {
        let fetched = releases.len();
        let mut candidates = self.filter.apply(releases);
        debug!(
            "{} of {} releases qualify (order by {})",
            candidates.len(),
            fetched,
            self.comparator.order_by()
        );

        self.comparator.sort(&mut candidates);
        CursorResolver::new(&self.comparator).resolve(&candidates, cursor)
    }
}

/// Runs a check against a release source
pub struct CheckCommand {
    source: Arc<dyn ReleaseSource>,
}

impl CheckCommand {
    pub fn new(source: Arc<dyn ReleaseSource>) -> Self {
        Self { source }
    }

    /// Build a command that lists releases from GitHub for `source`
    pub fn for_github(source: &Source) -> Result<Self, CheckError> {
        let releases = GitHubReleases::new(source.api_url(), source.owner(), &source.repository)?;
        Ok(Self::new(Arc::new(releases)))
    }

    /// Report the versions that are new relative to `request.version`
    ///
    /// Configuration errors are raised before the source is contacted.
    pub async fn run(&self, request: &CheckRequest) -> Result<Vec<VersionIdentity>, CheckError> {
        let context = CheckContext::new(&request.source.filter_config()?)?;

        let releases = self.source.fetch_releases().await?;
        info!("Fetched {} releases", releases.len());

        let versions = context.resolve(releases, &request.version);
        info!("Reporting {} versions", versions.len());

        Ok(versions)
    }
}
