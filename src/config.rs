use crate::domain::VersionBump;
use crate::error::{ReleaseError, Result};
use crate::tags::TagFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "release.toml";

/// Represents the complete configuration for release-range.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Log at debug level
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,
}

fn default_prefixes() -> Vec<String> {
    vec!["v".to_string()]
}

/// Which tag names count as releases.
///
/// A tag is a release when its name is a semantic version, either bare or
/// behind one of `prefixes`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagsConfig {
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<String>,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            prefixes: default_prefixes(),
        }
    }
}

impl TagsConfig {
    pub fn filter(&self) -> TagFilter {
        TagFilter::new(self.prefixes.iter().cloned())
    }
}

fn default_increment() -> String {
    VersionBump::default().as_str().to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfig {
    /// `major`, `minor` or `patch`
    #[serde(default = "default_increment")]
    pub increment: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            increment: default_increment(),
        }
    }
}

impl VersionConfig {
    pub fn bump(&self) -> Result<VersionBump> {
        self.increment.parse()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ChangelogConfig {
    /// Editor command; falls back to `$VISUAL`, `$EDITOR`, then `vi`
    #[serde(default)]
    pub editor: Option<String>,
}

/// Parse and validate configuration text
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(text).map_err(|e| ReleaseError::config(format!("Invalid TOML: {}", e)))?;

    config.version.bump()?;
    if config.tags.prefixes.iter().any(|p| p.is_empty()) {
        return Err(ReleaseError::config("Tag prefixes must not be empty strings"));
    }

    Ok(config)
}

/// Candidate locations, highest priority first
fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(".").join(CONFIG_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(CONFIG_FILE_NAME));
    }
    paths
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in current directory
/// 3. `release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or if an explicit path is missing
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => search_paths().into_iter().find(|p| p.exists()),
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    let text = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    parse_config(&text)
}
