//! Domain types - pure data independent of git access

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{Commit, Timestamp};
pub use tag::{ReleaseTag, Tag};
pub use version::{parse_version, propose_next_version, IncrementStrategy, VersionBump};
