use git2::Oid;

/// Seconds since the Unix epoch, as stored in commit signatures
pub type Timestamp = i64;

/// Read-only projection of a commit in the history graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: Oid,
    pub message: String,
    pub author_time: Timestamp,
    pub committer_time: Timestamp,
    /// Parent hashes in the order git records them
    pub parents: Vec<Oid>,
}

impl Commit {
    /// Create a root commit with zeroed timestamps
    pub fn new(hash: Oid, message: impl Into<String>) -> Self {
        Commit {
            hash,
            message: message.into(),
            author_time: 0,
            committer_time: 0,
            parents: Vec::new(),
        }
    }

    pub fn with_parents(mut self, parents: Vec<Oid>) -> Self {
        self.parents = parents;
        self
    }

    /// Set both author and committer time
    pub fn committed_at(mut self, time: Timestamp) -> Self {
        self.author_time = time;
        self.committer_time = time;
        self
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        match self.message.find('\n') {
            Some(pos) => &self.message[..pos],
            None => &self.message,
        }
    }

    /// Abbreviated 7-character hash
    pub fn short_hash(&self) -> String {
        let full = self.hash.to_string();
        if full.len() > 7 {
            full[..7].to_string()
        } else {
            full
        }
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}
