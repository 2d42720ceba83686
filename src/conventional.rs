//! Conventional commit classification
//!
//! Loosely follows <https://www.conventionalcommits.org>: the text before the
//! first `:` names the kind of change, and a trailing `!` on it marks the change
//! as breaking. Only a fixed set of kinds is recognised. Scopes such as
//! `feat(api):` are not part of that set and are reported as malformed.

use crate::domain::Commit;
use git2::Oid;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// The closed set of recognised commit kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommitKind {
    Ci,
    Docs,
    Feat,
    Fix,
    Refactor,
    Revert,
    Other,
}

impl CommitKind {
    pub const ALL: [CommitKind; 7] = [
        CommitKind::Ci,
        CommitKind::Docs,
        CommitKind::Feat,
        CommitKind::Fix,
        CommitKind::Refactor,
        CommitKind::Revert,
        CommitKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitKind::Ci => "ci",
            CommitKind::Docs => "docs",
            CommitKind::Feat => "feat",
            CommitKind::Fix => "fix",
            CommitKind::Refactor => "refactor",
            CommitKind::Revert => "revert",
            CommitKind::Other => "other",
        }
    }
}

impl fmt::Display for CommitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a commit message could not be classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformation {
    /// No `:` anywhere in the message
    MissingSeparator,
    /// Text before the `:` is not a recognised kind
    UnknownKind(String),
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformation::MissingSeparator => write!(f, "no ':' separating kind from description"),
            Malformation::UnknownKind(kind) => write!(f, "'{}' is not a valid commit kind", kind),
        }
    }
}

impl FromStr for CommitKind {
    type Err = Malformation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommitKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Malformation::UnknownKind(s.to_string()))
    }
}

/// A commit whose message carries a recognised kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub kind: CommitKind,
    pub breaking: bool,
    /// The commit as read from history; its message is not modified
    pub commit: Commit,
}

/// A commit whose message did not classify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedCommit {
    pub hash: Oid,
    /// Raw message, unmodified
    pub message: String,
    pub reason: Malformation,
}

/// Parsed and malformed commits, each in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub parsed: Vec<ParsedCommit>,
    pub malformed: Vec<MalformedCommit>,
}

impl Classification {
    pub fn total(&self) -> usize {
        self.parsed.len() + self.malformed.len()
    }

    pub fn has_breaking_changes(&self) -> bool {
        self.parsed.iter().any(|commit| commit.breaking)
    }

    /// Parsed commits of one kind, in input order
    pub fn of_kind(&self, kind: CommitKind) -> impl Iterator<Item = &ParsedCommit> {
        self.parsed.iter().filter(move |commit| commit.kind == kind)
    }
}

/// Extract `(kind, breaking)` from the start of a commit message
pub fn parse_prefix(message: &str) -> Result<(CommitKind, bool), Malformation> {
    let (raw_kind, _) = message
        .split_once(':')
        .ok_or(Malformation::MissingSeparator)?;

    let (raw_kind, breaking) = match raw_kind.strip_suffix('!') {
        Some(stripped) => (stripped, true),
        None => (raw_kind, false),
    };

    let kind = raw_kind.parse::<CommitKind>()?;
    Ok((kind, breaking))
}

/// Classify a single commit
pub fn classify_commit(commit: Commit) -> Result<ParsedCommit, MalformedCommit> {
    match parse_prefix(&commit.message) {
        Ok((kind, breaking)) => Ok(ParsedCommit {
            kind,
            breaking,
            commit,
        }),
        Err(reason) => Err(MalformedCommit {
            hash: commit.hash,
            message: commit.message,
            reason,
        }),
    }
}

/// Partition commits into parsed and malformed. Never fails as a whole.
pub fn classify<I>(commits: I) -> Classification
where
    I: IntoIterator<Item = Commit>,
{
    let mut classification = Classification::default();

    for commit in commits {
        match classify_commit(commit) {
            Ok(parsed) => classification.parsed.push(parsed),
            Err(malformed) => {
                debug!(
                    "Commit {} is not conventional: {}",
                    malformed.hash, malformed.reason
                );
                classification.malformed.push(malformed);
            }
        }
    }

    classification
}
