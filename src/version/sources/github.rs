//! GitHub Releases API source implementation

use tracing::{debug, warn};

use crate::config::{RELEASES_PER_PAGE, USER_AGENT};
use crate::version::error::SourceError;
use crate::version::source::ReleaseSource;
use crate::version::types::RawRelease;

/// Lists releases through the GitHub REST API
pub struct GitHubReleases {
    client: reqwest::Client,
    base_url: String,
    owner: String,
    repository: String,
}

impl GitHubReleases {
    /// Creates a source for `owner/repository` against `base_url`
    pub fn new(base_url: &str, owner: &str, repository: &str) -> Result<Self, SourceError> {
        Ok(Self {
            client: reqwest::Client::builder().user_agent(USER_AGENT).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repository: repository.to_string(),
        })
    }

    fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repository)
    }

    async fn fetch_page(&self, page: usize) -> Result<Vec<RawRelease>, SourceError> {
        let url = format!(
            "{}/repos/{}/releases?per_page={}&page={}",
            self.base_url,
            self.slug(),
            RELEASES_PER_PAGE,
            page
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(self.slug()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(SourceError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub releases response: {}", e);
            SourceError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait::async_trait]
impl ReleaseSource for GitHubReleases {
    async fn fetch_releases(&self) -> Result<Vec<RawRelease>, SourceError> {
        let mut releases = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.fetch_page(page).await?;
            let count = batch.len();
            debug!("Fetched page {} of {} releases ({} items)", page, self.slug(), count);
            releases.extend(batch);

            if count < RELEASES_PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(releases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const RELEASES_PATH: &str = "/repos/concourse/concourse/releases";

    fn page_query(page: usize) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("per_page".into(), RELEASES_PER_PAGE.to_string()),
            Matcher::UrlEncoded("page".into(), page.to_string()),
        ])
    }

    #[tokio::test]
    async fn fetch_releases_parses_release_fields() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", RELEASES_PATH)
            .match_query(page_query(1))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"id": 3, "tag_name": "v4.1.0", "draft": false, "prerelease": false,
                     "created_at": "2024-01-14T00:00:00Z", "published_at": "2024-01-15T00:00:00Z"},
                    {"id": 2, "tag_name": "v4.1.0-rc.1", "draft": false, "prerelease": true,
                     "created_at": "2024-01-01T00:00:00Z", "published_at": null},
                    {"id": 1, "tag_name": null, "draft": true, "prerelease": false,
                     "created_at": "2023-12-01T00:00:00Z", "published_at": null}
                ]"#,
            )
            .create_async()
            .await;

        let source = GitHubReleases::new(&server.url(), "concourse", "concourse").unwrap();
        let releases = source.fetch_releases().await.unwrap();

        mock.assert_async().await;
        let ids: Vec<u64> = releases.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(releases[0].tag(), Some("v4.1.0"));
        assert!(releases[1].prerelease);
        assert!(releases[2].draft);
        assert_eq!(releases[2].tag(), None);
    }

    #[tokio::test]
    async fn fetch_releases_follows_pages_until_short_page() {
        let mut server = Server::new_async().await;

        let full_page: Vec<serde_json::Value> = (0..RELEASES_PER_PAGE)
            .map(|i| serde_json::json!({"id": i + 10, "tag_name": format!("v1.0.{}", i)}))
            .collect();

        let first = server
            .mock("GET", RELEASES_PATH)
            .match_query(page_query(1))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&full_page).unwrap())
            .create_async()
            .await;
        let second = server
            .mock("GET", RELEASES_PATH)
            .match_query(page_query(2))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 1, "tag_name": "v0.9.0"}]"#)
            .create_async()
            .await;

        let source = GitHubReleases::new(&server.url(), "concourse", "concourse").unwrap();
        let releases = source.fetch_releases().await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(releases.len(), RELEASES_PER_PAGE + 1);
        assert_eq!(releases.last().and_then(|r| r.tag()), Some("v0.9.0"));
    }

    #[tokio::test]
    async fn fetch_releases_returns_not_found_for_nonexistent_repo() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", RELEASES_PATH)
            .match_query(page_query(1))
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let source = GitHubReleases::new(&server.url(), "concourse", "concourse").unwrap();
        let result = source.fetch_releases().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(SourceError::NotFound(ref slug)) if slug == "concourse/concourse"));
    }

    #[tokio::test]
    async fn fetch_releases_returns_rate_limited_for_429() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", RELEASES_PATH)
            .match_query(page_query(1))
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_header("retry-after", "60")
            .with_body(r#"{"message": "API rate limit exceeded"}"#)
            .create_async()
            .await;

        let source = GitHubReleases::new(&server.url(), "concourse", "concourse").unwrap();
        let result = source.fetch_releases().await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(SourceError::RateLimited {
                retry_after_secs: Some(60)
            })
        ));
    }

    #[tokio::test]
    async fn fetch_releases_returns_invalid_response_for_server_error() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", RELEASES_PATH)
            .match_query(page_query(1))
            .with_status(500)
            .create_async()
            .await;

        let source = GitHubReleases::new(&server.url(), "concourse", "concourse").unwrap();
        let result = source.fetch_releases().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(SourceError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn fetch_releases_returns_empty_for_repo_without_releases() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", RELEASES_PATH)
            .match_query(page_query(1))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let source = GitHubReleases::new(&server.url(), "concourse", "concourse").unwrap();
        let releases = source.fetch_releases().await.unwrap();

        mock.assert_async().await;
        assert!(releases.is_empty());
    }
}
