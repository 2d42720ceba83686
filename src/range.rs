//! Commit range resolution
//!
//! The range for a release is every commit reachable from HEAD that is not
//! reachable from (or equal to) the commit the latest release tag points at.
//! Merge commits are followed through all of their parents.
//!
//! Output order is a deterministic topological order: a commit always comes
//! before its parents, and among commits that are ready at the same time the
//! one with the newest committer time wins, ties going to the smaller hash.

use crate::domain::{Commit, ReleaseTag, Timestamp};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use git2::Oid;
use log::debug;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Release tag (if any) together with the commits introduced since it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    pub tag: Option<ReleaseTag>,
    /// Head-first
    pub commits: Vec<Commit>,
}

impl CommitRange {
    /// Range for a repository that has never been released
    pub fn no_prior_release() -> Self {
        CommitRange {
            tag: None,
            commits: Vec::new(),
        }
    }

    pub fn has_prior_release(&self) -> bool {
        self.tag.is_some()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Heap entry; the greatest entry is emitted first
#[derive(Debug, PartialEq, Eq)]
struct Ready {
    committer_time: Timestamp,
    hash: Reverse<Oid>,
}

impl Ord for Ready {
    fn cmp(&self, other: &Self) -> Ordering {
        self.committer_time
            .cmp(&other.committer_time)
            .then_with(|| self.hash.cmp(&other.hash))
    }
}

impl PartialOrd for Ready {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Walks history from HEAD back to a release tag
pub struct CommitRangeWalker<'r, R: Repository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: Repository + ?Sized> CommitRangeWalker<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        CommitRangeWalker { repo }
    }

    /// Resolve the range for `tag`, or an empty range when there is no tag
    pub fn resolve(&self, tag: Option<ReleaseTag>) -> Result<CommitRange> {
        let Some(tag) = tag else {
            debug!("No release tag found; nothing to compare against");
            return Ok(CommitRange::no_prior_release());
        };

        let head = self.repo.head()?;
        let commits = self.commits_since(head, &tag)?;

        debug!(
            "Collected {} commits since release tag {} ({})",
            commits.len(),
            tag.name(),
            tag.target()
        );

        Ok(CommitRange {
            tag: Some(tag),
            commits,
        })
    }

    /// Commits reachable from `head` but not from the tag's target, head-first
    pub fn commits_since(&self, head: Oid, tag: &ReleaseTag) -> Result<Vec<Commit>> {
        let boundary = tag.target();
        if head == boundary {
            return Ok(Vec::new());
        }

        let hidden: HashSet<Oid> = self
            .repo
            .walk_history(boundary)?
            .into_iter()
            .map(|commit| commit.hash)
            .collect();

        // HEAD behind the tag: the tag is not in HEAD's history
        if hidden.contains(&head) {
            return Err(not_in_history(tag));
        }

        let (range, found) = self.collect_range(head, boundary, &hidden)?;
        if !found {
            return Err(not_in_history(tag));
        }

        debug!(
            "Range walk visited {} commits, hid {} ancestors of {}",
            range.len(),
            hidden.len(),
            boundary
        );

        Ok(order_head_first(head, range))
    }

    /// Collect commits reachable from `head` without entering `hidden`.
    ///
    /// In a DAG the first hidden commit reached on any path from head to the
    /// boundary is the boundary itself, so seeing it as a parent here is
    /// exactly the reachability test.
    fn collect_range(
        &self,
        head: Oid,
        boundary: Oid,
        hidden: &HashSet<Oid>,
    ) -> Result<(HashMap<Oid, Commit>, bool)> {
        let mut range = HashMap::new();
        let mut stack = vec![head];
        let mut found = false;

        while let Some(hash) = stack.pop() {
            if range.contains_key(&hash) {
                continue;
            }

            let commit = self.repo.get_commit(hash)?;
            for parent in &commit.parents {
                if *parent == boundary {
                    found = true;
                }
                if !hidden.contains(parent) && !range.contains_key(parent) {
                    stack.push(*parent);
                }
            }
            range.insert(hash, commit);
        }

        Ok((range, found))
    }
}

fn not_in_history(tag: &ReleaseTag) -> ReleaseError {
    ReleaseError::TagNotInHistory {
        tag: tag.name().to_string(),
        target: tag.target(),
    }
}

/// Kahn's algorithm over the range, newest ready commit first
fn order_head_first(head: Oid, mut range: HashMap<Oid, Commit>) -> Vec<Commit> {
    let mut pending_children: HashMap<Oid, usize> = HashMap::new();
    for commit in range.values() {
        for parent in &commit.parents {
            if range.contains_key(parent) {
                *pending_children.entry(*parent).or_insert(0) += 1;
            }
        }
    }

    let mut ready = BinaryHeap::new();
    if let Some(commit) = range.get(&head) {
        ready.push(Ready {
            committer_time: commit.committer_time,
            hash: Reverse(head),
        });
    }

    let mut ordered = Vec::with_capacity(range.len());
    while let Some(Ready {
        hash: Reverse(hash), ..
    }) = ready.pop()
    {
        let Some(commit) = range.remove(&hash) else {
            continue;
        };

        for parent in &commit.parents {
            if let Some(count) = pending_children.get_mut(parent) {
                *count -= 1;
                if *count == 0 {
                    if let Some(next) = range.get(parent) {
                        ready.push(Ready {
                            committer_time: next.committer_time,
                            hash: Reverse(*parent),
                        });
                    }
                }
            }
        }

        ordered.push(commit);
    }

    ordered
}
