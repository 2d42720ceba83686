#![allow(dead_code)]

use git2::{Commit, Oid, Repository, Signature, Time};
use tempfile::TempDir;

/// Temporary repository with helpers for building histories with fixed times
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");
        TestRepo { dir, repo }
    }

    fn signature(time: i64) -> Signature<'static> {
        Signature::new("Test User", "test@example.com", &Time::new(time, 0))
            .expect("Could not build signature")
    }

    /// Commit an empty tree on top of `parents`, moving HEAD when `update_head`
    pub fn commit_with(&self, message: &str, time: i64, parents: &[Oid], update_head: bool) -> Oid {
        let sig = Self::signature(time);
        let tree_id = self
            .repo
            .treebuilder(None)
            .and_then(|builder| builder.write())
            .expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parents: Vec<Commit> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("Missing parent"))
            .collect();
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        let update_ref = if update_head { Some("HEAD") } else { None };
        self.repo
            .commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    /// Commit on top of the current HEAD (or as root when HEAD is unborn)
    pub fn commit(&self, message: &str, time: i64) -> Oid {
        let parents: Vec<Oid> = match self.repo.head() {
            Ok(head) => vec![head.target().expect("HEAD has no target")],
            Err(_) => Vec::new(),
        };
        self.commit_with(message, time, &parents, true)
    }

    /// Point the checked-out branch at `oid`
    pub fn set_head(&self, oid: Oid) {
        let head = self.repo.head().expect("HEAD is unborn");
        let name = head.name().expect("HEAD name is not UTF-8").to_string();
        self.repo
            .reference(&name, oid, true, "move head")
            .expect("Could not move HEAD");
    }

    pub fn lightweight_tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn annotated_tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo
            .tag(name, &object, &Self::signature(0), "release", false)
            .expect("Could not create tag");
    }
}
