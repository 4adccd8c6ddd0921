//! Release classification and filtering
//!
//! Decides which releases are candidates for a check. Each release is judged
//! on its own; the relative order of the survivors is preserved.

use regex::Regex;
use tracing::debug;

use crate::version::comparator::OrderBy;
use crate::version::error::ConfigError;
use crate::version::extractor::{VersionExtractor, VersionRule};
use crate::version::loose::LooseVersion;
use crate::version::semver::{Constraint, parse_strict};
use crate::version::types::RawRelease;

/// Kind of release as published by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Release,
    PreRelease,
    Draft,
}

impl Classification {
    pub fn of(release: &RawRelease) -> Self {
        if release.draft {
            Classification::Draft
        } else if release.prerelease {
            Classification::PreRelease
        } else {
            Classification::Release
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Release => "release",
            Classification::PreRelease => "pre-release",
            Classification::Draft => "draft",
        }
    }
}

/// Filtering options, as read from the source configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub include_drafts: bool,
    pub include_pre_release: bool,
    pub include_release: bool,
    pub tag_filter: Option<String>,
    pub semver_constraint: Option<String>,
    pub order_by: OrderBy,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_drafts: false,
            include_pre_release: false,
            include_release: true,
            tag_filter: None,
            semver_constraint: None,
            order_by: OrderBy::Version,
        }
    }
}

/// Release kinds a check accepts, derived once from the three source flags
///
/// Drafts and published releases are never mixed: `drafts` selects one of
/// the two universes. Within it the pre-release flag decides between the
/// pre-release and release categories. A category is rejected only when it
/// is not asked for while the other one is, so disabling both accepts both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedKinds {
    drafts: bool,
    pre_release: bool,
    release: bool,
}

impl AllowedKinds {
    pub fn from_flags(include_drafts: bool, include_pre_release: bool, include_release: bool) -> Self {
        Self {
            drafts: include_drafts,
            pre_release: include_pre_release || !include_release,
            release: include_release || !include_pre_release,
        }
    }

    pub fn allows(&self, release: &RawRelease) -> bool {
        if release.draft != self.drafts {
            return false;
        }
        if release.prerelease {
            self.pre_release
        } else {
            self.release
        }
    }
}

/// Why a release was left out of the candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Kind,
    MissingTag,
    NotSemver,
    OutsideConstraint,
    TagFilter,
    UnparsableVersion,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::Kind => "release kind not selected",
            Rejection::MissingTag => "no tag",
            Rejection::NotSemver => "version is not strict semver",
            Rejection::OutsideConstraint => "version outside semver constraint",
            Rejection::TagFilter => "tag does not match tag filter",
            Rejection::UnparsableVersion => "version cannot be ordered",
        }
    }
}

/// Compiled filter, built once per invocation
#[derive(Debug, Clone)]
pub struct ReleaseFilter {
    kinds: AllowedKinds,
    tag_filter: Option<Regex>,
    constraint: Option<Constraint>,
    order_by: OrderBy,
    extractor: VersionExtractor,
}

impl ReleaseFilter {
    /// Compile the tag filter and semver constraint
    ///
    /// The tag filter doubles as the version extraction rule.
    pub fn new(config: &FilterConfig) -> Result<Self, ConfigError> {
        let rule = VersionRule::from_pattern(config.tag_filter.as_deref())?;
        let tag_filter = match &rule {
            VersionRule::Regex { pattern, .. } => Some(pattern.clone()),
            VersionRule::Default => None,
        };
        let constraint = config
            .semver_constraint
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(Constraint::parse)
            .transpose()?;

        Ok(Self {
            kinds: AllowedKinds::from_flags(
                config.include_drafts,
                config.include_pre_release,
                config.include_release,
            ),
            tag_filter,
            constraint,
            order_by: config.order_by,
            extractor: VersionExtractor::new(rule),
        })
    }

    pub fn extractor(&self) -> &VersionExtractor {
        &self.extractor
    }

    /// Return why a release is rejected, or `None` if it is a candidate
    pub fn rejection(&self, release: &RawRelease) -> Option<Rejection> {
        if !self.kinds.allows(release) {
            return Some(Rejection::Kind);
        }

        if let Some(constraint) = &self.constraint {
            let Some(tag) = release.tag() else {
                return Some(Rejection::MissingTag);
            };
            let Some(version) = parse_strict(&self.extractor.extract(tag)) else {
                return Some(Rejection::NotSemver);
            };
            if !constraint.matches(&version) {
                return Some(Rejection::OutsideConstraint);
            }
        }

        if let Some(filter) = &self.tag_filter {
            if !filter.is_match(release.tag().unwrap_or_default()) {
                return Some(Rejection::TagFilter);
            }
        }

        if self.order_by == OrderBy::Version {
            let Some(tag) = release.tag() else {
                return Some(Rejection::MissingTag);
            };
            if LooseVersion::parse(&self.extractor.extract(tag)).is_err() {
                return Some(Rejection::UnparsableVersion);
            }
        }

        None
    }

    /// Keep the candidates, in their original order
    pub fn apply(&self, releases: Vec<RawRelease>) -> Vec<RawRelease> {
        releases
            .into_iter()
            .filter(|release| match self.rejection(release) {
                None => true,
                Some(reason) => {
                    debug!(
                        "Skipping {} {} ({:?}): {}",
                        Classification::of(release).as_str(),
                        release.id,
                        release.tag().unwrap_or_default(),
                        reason.as_str()
                    );
                    false
                }
            })
            .collect()
    }
}
