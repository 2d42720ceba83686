//! Release tag filtering and selection
//!
//! Repositories routinely carry tags that are not releases (`nightly`,
//! `deploy-42`, ...). Those are dropped here without being reported as errors.
//! Among the remaining tags the latest release is the one with the greatest
//! semantic-version precedence; commit dates play no part in the choice.

use crate::domain::{ReleaseTag, Tag};
use log::debug;
use semver::Version;
use std::cmp::Ordering;

/// Selects tags whose names parse as semantic versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    prefixes: Vec<String>,
}

impl TagFilter {
    /// Accept bare versions plus versions behind any of `prefixes`
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TagFilter {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Accept only bare versions such as `1.2.3`
    pub fn bare() -> Self {
        TagFilter {
            prefixes: Vec::new(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Parse a tag name into a version, if it names a release
    pub fn parse_version(&self, name: &str) -> Option<Version> {
        if let Ok(version) = Version::parse(name) {
            return Some(version);
        }

        self.prefixes
            .iter()
            .filter_map(|prefix| name.strip_prefix(prefix.as_str()))
            .find_map(|rest| Version::parse(rest).ok())
    }

    /// Keep only release tags. Output order follows input order.
    pub fn filter<I>(&self, tags: I) -> Vec<ReleaseTag>
    where
        I: IntoIterator<Item = Tag>,
    {
        tags.into_iter()
            .filter_map(|tag| match self.parse_version(&tag.name) {
                Some(version) => Some(ReleaseTag::new(tag, version)),
                None => {
                    debug!("Skipping non-semver tag '{}'", tag.name);
                    None
                }
            })
            .collect()
    }
}

impl Default for TagFilter {
    fn default() -> Self {
        TagFilter::new(["v"])
    }
}

/// Order two release tags by precedence, then by name
///
/// Equal versions under different names should not occur in a well-kept
/// repository; the name comparison only keeps the choice stable when they do.
fn release_order(a: &ReleaseTag, b: &ReleaseTag) -> Ordering {
    a.version
        .cmp(&b.version)
        .then_with(|| a.tag.name.cmp(&b.tag.name))
}

/// Pick the release tag with the greatest version precedence
pub fn select_latest<I>(tags: I) -> Option<ReleaseTag>
where
    I: IntoIterator<Item = ReleaseTag>,
{
    tags.into_iter().max_by(release_order)
}
