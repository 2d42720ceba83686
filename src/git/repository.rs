use crate::domain::{Commit, Tag};
use crate::error::Result;
use git2::{Oid, Repository as Git2Repo, Sort};
use log::debug;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn to_commit(commit: &git2::Commit<'_>) -> Commit {
        Commit {
            hash: commit.id(),
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            author_time: commit.author().when().seconds(),
            committer_time: commit.committer().when().seconds(),
            parents: commit.parent_ids().collect(),
        }
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<Tag>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;

            // Tags on trees or blobs can never be a release baseline
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(Tag::new(name, commit.id())),
                Err(e) => debug!("Skipping tag '{}' that does not point at a commit: {}", name, e),
            }
        }

        Ok(tags)
    }

    fn head(&self) -> Result<Oid> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.id())
    }

    fn get_commit(&self, hash: Oid) -> Result<Commit> {
        let commit = self.repo.find_commit(hash)?;
        Ok(Self::to_commit(&commit))
    }

    fn walk_history(&self, from: Oid) -> Result<Vec<Commit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(from)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(Self::to_commit(&commit));
        }

        Ok(commits)
    }
}
