use crate::domain::{Commit, Tag};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use git2::Oid;
use std::collections::HashMap;

/// In-memory commit graph for testing without actual git operations
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    commits: HashMap<Oid, Commit>,
    tags: Vec<Tag>,
    head: Option<Oid>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit to the mock repository
    pub fn add_commit(&mut self, commit: Commit) {
        self.commits.insert(commit.hash, commit);
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, target: Oid) {
        self.tags.push(Tag::new(name, target));
    }

    /// Point HEAD at a commit
    pub fn set_head(&mut self, oid: Oid) {
        self.head = Some(oid);
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn head(&self) -> Result<Oid> {
        self.head
            .ok_or_else(|| ReleaseError::repository("HEAD is not set"))
    }

    fn get_commit(&self, hash: Oid) -> Result<Commit> {
        self.commits
            .get(&hash)
            .cloned()
            .ok_or_else(|| ReleaseError::repository(format!("Commit not found: {}", hash)))
    }
}
