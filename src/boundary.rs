use std::fmt;

/// Non-fatal conditions found while resolving a release.
/// These are reported to the user; none of them stops the flow.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No tag parses as a semantic version
    NoPriorRelease { ignored_tags: usize },
    /// No new commits since the latest tag
    NoNewCommits {
        latest_tag: String,
        current_commit_hash: String,
    },
    /// Tags skipped because their names are not semantic versions
    IgnoredTags { count: usize },
    /// Commits whose messages do not follow the conventional format
    MalformedCommits { count: usize, total: usize },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoPriorRelease { ignored_tags } => {
                write!(f, "No previous release found")?;
                if *ignored_tags > 0 {
                    write!(f, " ({} non-semver tags ignored)", ignored_tags)?;
                }
                Ok(())
            }
            BoundaryWarning::NoNewCommits {
                latest_tag,
                current_commit_hash,
            } => {
                let short_hash = if current_commit_hash.len() > 7 {
                    &current_commit_hash[..7]
                } else {
                    current_commit_hash.as_str()
                };
                write!(
                    f,
                    "No new commits since tag '{}' (current: {})",
                    latest_tag, short_hash
                )
            }
            BoundaryWarning::IgnoredTags { count } => {
                write!(f, "{} non-semver tags ignored", count)
            }
            BoundaryWarning::MalformedCommits { count, total } => {
                write!(
                    f,
                    "{} of {} commits do not follow the conventional format",
                    count, total
                )
            }
        }
    }
}
