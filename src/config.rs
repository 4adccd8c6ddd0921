use serde::Deserialize;

use crate::version::classifier::FilterConfig;
use crate::version::comparator::OrderBy;
use crate::version::error::ConfigError;
use crate::version::types::Cursor;

/// Default base URL for the GitHub REST API
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Page size requested when listing releases (the API maximum)
pub const RELEASES_PER_PAGE: usize = 100;

pub const USER_AGENT: &str = "release-resource";

/// Source configuration for a check
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Source {
    pub owner: String,
    pub repository: String,
    /// Deprecated alias for `owner`; wins when set
    pub user: String,
    pub github_api_url: Option<String>,
    pub drafts: bool,
    pub pre_release: bool,
    pub release: bool,
    pub tag_filter: Option<String>,
    pub semver_constraint: Option<String>,
    pub order_by: Option<String>,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repository: String::new(),
            user: String::new(),
            github_api_url: None,
            drafts: false,
            pre_release: false,
            release: true,
            tag_filter: None,
            semver_constraint: None,
            order_by: None,
        }
    }
}

impl Source {
    /// Repository owner, honouring the deprecated `user` field
    pub fn owner(&self) -> &str {
        if self.user.is_empty() {
            &self.owner
        } else {
            &self.user
        }
    }

    pub fn api_url(&self) -> &str {
        self.github_api_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_GITHUB_API_URL)
    }

    /// Filtering options for the resolution engine
    pub fn filter_config(&self) -> Result<FilterConfig, ConfigError> {
        let order_by = self.order_by.as_deref().unwrap_or_default().parse::<OrderBy>()?;

        Ok(FilterConfig {
            include_drafts: self.drafts,
            include_pre_release: self.pre_release,
            include_release: self.release,
            tag_filter: self.tag_filter.clone().filter(|s| !s.is_empty()),
            semver_constraint: self.semver_constraint.clone().filter(|s| !s.is_empty()),
            order_by,
        })
    }
}

/// Request read from stdin by the check command
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckRequest {
    pub source: Source,
    #[serde(deserialize_with = "cursor_or_empty")]
    pub version: Cursor,
}

/// `"version": null` is the same as no version at all
fn cursor_or_empty<'de, D>(deserializer: D) -> Result<Cursor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Cursor>::deserialize(deserializer).map(Option::unwrap_or_default)
}
