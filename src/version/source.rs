//! Release listing abstraction

#[cfg(test)]
use mockall::automock;

use crate::version::error::SourceError;
use crate::version::types::RawRelease;

/// Provides the complete set of releases for one repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetches every release, across all pages, as of call time
    ///
    /// # Returns
    /// * `Ok(Vec<RawRelease>)` - Releases in the order the host reports them
    /// * `Err(SourceError)` - If the listing fails; no partial result is returned
    async fn fetch_releases(&self) -> Result<Vec<RawRelease>, SourceError>;
}
