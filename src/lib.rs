//! Release range resolution and conventional-commit classification.
//!
//! Given a repository's tags and history this crate finds the latest release
//! tag, the commits introduced since it, and the conventional-commit kind of
//! each of those commits.

pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod git;
pub mod range;
pub mod release;
pub mod tags;
pub mod ui;

pub use error::{ReleaseError, Result};
pub use release::{ReleasePlan, ReleaseResolver};
