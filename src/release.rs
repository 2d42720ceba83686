//! Entry points used by changelog assembly, version prompting and publishing

use crate::conventional::{self, Classification};
use crate::domain::{parse_version, propose_next_version, Commit, IncrementStrategy, ReleaseTag};
use crate::error::Result;
use crate::git::Repository;
use crate::range::{CommitRange, CommitRangeWalker};
use crate::tags::{self, TagFilter};
use log::debug;

/// Resolves releases against a read-only repository snapshot
pub struct ReleaseResolver<'r, R: Repository + ?Sized> {
    repo: &'r R,
    filter: TagFilter,
}

impl<'r, R: Repository + ?Sized> ReleaseResolver<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        ReleaseResolver {
            repo,
            filter: TagFilter::default(),
        }
    }

    pub fn with_tag_filter(mut self, filter: TagFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Latest release tag by version precedence, if any tag names a release
    pub fn resolve_latest_tag(&self) -> Result<Option<ReleaseTag>> {
        Ok(self.scan_tags()?.latest)
    }

    /// Read the tag list once and keep the release with the greatest version
    fn scan_tags(&self) -> Result<TagScan> {
        let tags = self.repo.list_tags()?;
        let total = tags.len();
        let releases = self.filter.filter(tags);

        debug!(
            "{} of {} tags parse as semantic versions",
            releases.len(),
            total
        );

        Ok(TagScan {
            ignored: total - releases.len(),
            latest: tags::select_latest(releases),
        })
    }

    /// Latest release tag plus the commits introduced since it, head-first
    ///
    /// Fails with `TagNotInHistory` when the tag's commit is not an ancestor
    /// of HEAD. Without any release tag the range is empty.
    pub fn resolve_commit_range(&self) -> Result<CommitRange> {
        let latest = self.resolve_latest_tag()?;
        CommitRangeWalker::new(self.repo).resolve(latest)
    }

    pub fn classify(&self, commits: &[Commit]) -> Classification {
        conventional::classify(commits.iter().cloned())
    }

    pub fn propose_next_version<S>(&self, tag: &ReleaseTag, strategy: &S) -> String
    where
        S: IncrementStrategy + ?Sized,
    {
        propose_next_version(&tag.version, strategy)
    }

    /// Resolve everything a release needs in one pass
    ///
    /// Tags and HEAD are each read once, so the plan describes a single
    /// snapshot of the repository. An explicit version from the caller wins
    /// over the proposal and must parse as a semantic version.
    pub fn plan<S>(&self, explicit_version: Option<&str>, strategy: &S) -> Result<ReleasePlan>
    where
        S: IncrementStrategy + ?Sized,
    {
        let explicit = explicit_version
            .map(|v| parse_version(v).map(|parsed| parsed.to_string()))
            .transpose()?;

        let scan = self.scan_tags()?;
        let range = CommitRangeWalker::new(self.repo).resolve(scan.latest)?;
        let classification = self.classify(&range.commits);
        let proposed_version = range
            .tag
            .as_ref()
            .map(|tag| self.propose_next_version(tag, strategy));

        Ok(ReleasePlan {
            range,
            classification,
            proposed_version,
            explicit_version: explicit,
            ignored_tags: scan.ignored,
        })
    }
}

struct TagScan {
    latest: Option<ReleaseTag>,
    ignored: usize,
}

/// Everything resolved for one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub range: CommitRange,
    pub classification: Classification,
    /// `None` when there is no prior release to increment from
    pub proposed_version: Option<String>,
    pub explicit_version: Option<String>,
    /// Tags whose names are not semantic versions
    pub ignored_tags: usize,
}

impl ReleasePlan {
    /// Version to release: the explicit one if given, else the proposal
    pub fn next_version(&self) -> Option<&str> {
        self.explicit_version
            .as_deref()
            .or(self.proposed_version.as_deref())
    }

    pub fn latest_tag(&self) -> Option<&ReleaseTag> {
        self.range.tag.as_ref()
    }
}
