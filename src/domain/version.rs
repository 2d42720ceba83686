use crate::error::{ReleaseError, Result};
use semver::Version;
use std::fmt;
use std::str::FromStr;

/// Parse a user-supplied version, accepting an optional `v`/`V` prefix
pub fn parse_version(input: &str) -> Result<Version> {
    let clean = input
        .trim()
        .trim_start_matches('v')
        .trim_start_matches('V');

    Version::parse(clean)
        .map_err(|e| ReleaseError::version(format!("Invalid version '{}': {}", input, e)))
}

/// Rule for deriving the next version from the latest release.
///
/// Implementations only see the current version; they are never handed the
/// commits of the range.
pub trait IncrementStrategy {
    fn next_version(&self, current: &Version) -> Version;
}

impl<F> IncrementStrategy for F
where
    F: Fn(&Version) -> Version,
{
    fn next_version(&self, current: &Version) -> Version {
        self(current)
    }
}

/// Fixed component bump. Pre-release and build metadata are always dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionBump {
    Major,
    #[default]
    Minor,
    Patch,
}

impl VersionBump {
    /// Bump version according to bump type
    pub fn bump(&self, version: &Version) -> Version {
        match self {
            VersionBump::Major => Version::new(version.major + 1, 0, 0),
            VersionBump::Minor => Version::new(version.major, version.minor + 1, 0),
            VersionBump::Patch => Version::new(version.major, version.minor, version.patch + 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        }
    }
}

impl IncrementStrategy for VersionBump {
    fn next_version(&self, current: &Version) -> Version {
        self.bump(current)
    }
}

impl FromStr for VersionBump {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(VersionBump::Major),
            "minor" => Ok(VersionBump::Minor),
            "patch" => Ok(VersionBump::Patch),
            other => Err(ReleaseError::config(format!(
                "Unknown increment '{}' - expected major, minor or patch",
                other
            ))),
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Propose the version following `current` using `strategy`
pub fn propose_next_version<S>(current: &Version, strategy: &S) -> String
where
    S: IncrementStrategy + ?Sized,
{
    strategy.next_version(current).to_string()
}
