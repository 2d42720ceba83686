//! Repository access abstraction layer
//!
//! The release engine only reads from version control: it lists tags, resolves
//! HEAD and looks up commits. This module defines that read-only surface as the
//! [Repository] trait so the engine can run against a real repository or an
//! in-memory graph.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory commit graph for testing
//!
//! ```rust
//! # use release_range::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> release_range::Result<()> {
//! let head = repo.head()?;
//! let history = repo.walk_history(head)?;
//! println!("{} commits reachable from HEAD", history.len());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{Commit, Tag};
use crate::error::Result;
use git2::Oid;
use std::collections::HashSet;

/// Read-only git access needed to resolve a release range
///
/// Any error returned by an implementation is propagated unchanged by the
/// engine; there is no retry or recovery at this layer.
pub trait Repository {
    /// List every tag together with the commit it points to
    ///
    /// Annotated tags must be peeled to their commit. No ordering is implied.
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Get the commit currently checked out
    fn head(&self) -> Result<Oid>;

    /// Look up a single commit by hash
    fn get_commit(&self, hash: Oid) -> Result<Commit>;

    /// Get every commit reachable from `from`, including `from` itself
    ///
    /// The order of the returned commits is implementation-defined; callers
    /// that need a stable order must impose one.
    fn walk_history(&self, from: Oid) -> Result<Vec<Commit>> {
        let mut seen = HashSet::new();
        let mut stack = vec![from];
        let mut commits = Vec::new();

        while let Some(hash) = stack.pop() {
            if !seen.insert(hash) {
                continue;
            }

            let commit = self.get_commit(hash)?;
            stack.extend(commit.parents.iter().copied());
            commits.push(commit);
        }

        Ok(commits)
    }
}

impl<R: Repository + ?Sized> Repository for &R {
    fn list_tags(&self) -> Result<Vec<Tag>> {
        (**self).list_tags()
    }

    fn head(&self) -> Result<Oid> {
        (**self).head()
    }

    fn get_commit(&self, hash: Oid) -> Result<Commit> {
        (**self).get_commit(hash)
    }

    fn walk_history(&self, from: Oid) -> Result<Vec<Commit>> {
        (**self).walk_history(from)
    }
}
