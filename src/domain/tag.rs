use git2::Oid;
use semver::Version;

/// Represents a git tag and the commit it ultimately points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub target: Oid,
}

impl Tag {
    /// Create a new tag pointing at `target`
    pub fn new(name: impl Into<String>, target: Oid) -> Self {
        Tag {
            name: name.into(),
            target,
        }
    }
}

/// A tag whose name parsed as a semantic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub tag: Tag,
    pub version: Version,
}

impl ReleaseTag {
    pub fn new(tag: Tag, version: Version) -> Self {
        ReleaseTag { tag, version }
    }

    pub fn name(&self) -> &str {
        &self.tag.name
    }

    /// Commit the release was cut from
    pub fn target(&self) -> Oid {
        self.tag.target
    }
}
