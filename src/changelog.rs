//! Changelog draft handoff
//!
//! Builds the per-commit lines a human starts a changelog from and defines the
//! editing capability as an injected [ChangelogEditor]. The release engine
//! never renders or rewrites changelog prose itself.

use crate::domain::Commit;
use crate::error::{ReleaseError, Result};
use log::{debug, info};
use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Lines prefixed with this are dropped after editing
const COMMENT_PREFIX: &str = "//";

const VISUAL_ENV_VAR: &str = "VISUAL";
const EDITOR_ENV_VAR: &str = "EDITOR";
const DEFAULT_EDITOR: &str = "vi";
const DEFAULT_DRAFT_NAME: &str = "release-changelog.md";

/// Commit lines for a release, head-first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogDraft {
    /// `<short hash>: <summary>`
    pub short_lines: Vec<String>,
    /// `<full hash>: <full message>`
    pub long_lines: Vec<String>,
}

impl ChangelogDraft {
    pub fn from_commits(commits: &[Commit]) -> Self {
        ChangelogDraft {
            short_lines: commits
                .iter()
                .map(|c| format!("{}: {}", c.short_hash(), c.summary()))
                .collect(),
            long_lines: commits
                .iter()
                .map(|c| format!("{}: {}", c.hash, c.message))
                .collect(),
        }
    }

    /// Text handed to an editor: short lines, one per row
    pub fn text(&self) -> String {
        self.short_lines.join("\n")
    }
}

/// Turns drafted text into edited text
pub trait ChangelogEditor {
    fn edit(&self, draft: &str) -> Result<String>;
}

/// Returns the draft unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughEditor;

impl ChangelogEditor for PassthroughEditor {
    fn edit(&self, draft: &str) -> Result<String> {
        Ok(draft.to_string())
    }
}

/// Opens the draft in an external editor process
///
/// The draft lives at a stable path per release. When an edit fails the file
/// is left behind, and the next edit of the same release reopens it instead of
/// starting from a fresh draft.
#[derive(Debug, Clone)]
pub struct CommandEditor {
    command: String,
    workdir: PathBuf,
    draft_name: String,
}

impl CommandEditor {
    /// Use an explicit editor command such as `code --wait`
    ///
    /// The command is split on whitespace. Quoting is not understood, so an
    /// argument containing spaces (`sh -c '...'`) cannot be passed; wrap such
    /// commands in a script instead.
    pub fn new(command: impl Into<String>) -> Self {
        CommandEditor {
            command: command.into(),
            workdir: env::temp_dir(),
            draft_name: DEFAULT_DRAFT_NAME.to_string(),
        }
    }

    /// Resolve the editor from `$VISUAL`, then `$EDITOR`, then `vi`
    pub fn from_env() -> Self {
        let command = [VISUAL_ENV_VAR, EDITOR_ENV_VAR]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

        Self::new(command)
    }

    /// Directory the draft file is written to
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = dir.into();
        self
    }

    /// Key the draft file on a release, e.g. `myproject-1.4.0`
    pub fn for_release(mut self, key: &str) -> Self {
        let key: String = key
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
                _ => '_',
            })
            .collect();
        self.draft_name = format!("release-changelog-{}.md", key);
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn draft_path(&self) -> PathBuf {
        self.workdir.join(&self.draft_name)
    }

    /// Create the draft file, or keep a draft left over from an earlier run
    fn prepare_draft(&self, path: &Path, draft: &str) -> Result<()> {
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(mut file) => {
                file.write_all(draft.as_bytes())?;
                debug!("Wrote changelog draft to {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if fs::symlink_metadata(path)?.file_type().is_symlink() {
                    return Err(ReleaseError::editor(format!(
                        "Refusing to reuse {}: it is a symlink",
                        path.display()
                    )));
                }
                info!("Recovered previous changelog draft ({})", path.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn run(&self, file: &Path) -> Result<()> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| ReleaseError::editor("Editor command is empty"))?;

        let status = Command::new(program)
            .args(parts)
            .arg(file)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ReleaseError::editor(format!("Failed to start '{}': {}", program, e)))?;

        if !status.success() {
            return Err(ReleaseError::editor(format!(
                "'{}' exited with {}; draft kept at {}",
                self.command,
                status,
                file.display()
            )));
        }

        Ok(())
    }
}

impl ChangelogEditor for CommandEditor {
    fn edit(&self, draft: &str) -> Result<String> {
        let path = self.draft_path();
        self.prepare_draft(&path, draft)?;

        // Any failure from here on leaves the draft for the next run
        self.run(&path)?;
        let content = fs::read_to_string(&path)?;
        fs::remove_file(&path)?;

        Ok(remove_comments(&content))
    }
}

/// Drop lines that start with `//` after leading whitespace
pub fn remove_comments(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with(COMMENT_PREFIX))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Oid;
    use serial_test::serial;

    #[test]
    fn test_draft_lines() {
        let hash = Oid::from_str("0123456789abcdef0123456789abcdef01234567").unwrap();
        let commits = vec![Commit::new(hash, "feat: add x\n\nbody text")];

        let draft = ChangelogDraft::from_commits(&commits);
        assert_eq!(draft.short_lines, vec!["0123456: feat: add x"]);
        assert_eq!(
            draft.long_lines,
            vec!["0123456789abcdef0123456789abcdef01234567: feat: add x\n\nbody text"]
        );
        assert_eq!(draft.text(), "0123456: feat: add x");
    }

    #[test]
    fn test_passthrough_editor() {
        assert_eq!(PassthroughEditor.edit("draft").unwrap(), "draft");
    }

    #[test]
    fn test_remove_comments() {
        let text = "// header\nkeep me\n   // indented comment\nhttp://not-a-comment";
        assert_eq!(remove_comments(text), "keep me\nhttp://not-a-comment");
    }

    #[test]
    fn test_empty_editor_command_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = CommandEditor::new("   ")
            .in_dir(dir.path())
            .edit("draft")
            .unwrap_err();
        assert!(err.to_string().contains("Editor command is empty"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_editor_round_trip() {
        // `true` leaves the file untouched and exits successfully
        let dir = tempfile::TempDir::new().unwrap();
        let editor = CommandEditor::new("true").in_dir(dir.path());
        let edited = editor.edit("// drop\nline one").unwrap();

        assert_eq!(edited, "line one");
        assert!(!editor.draft_path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_edit_is_recovered_next_time() {
        let dir = tempfile::TempDir::new().unwrap();

        let err = CommandEditor::new("false")
            .in_dir(dir.path())
            .for_release("app-1.2.0")
            .edit("first draft")
            .unwrap_err();
        assert!(matches!(err, ReleaseError::Editor(_)));

        let leftover = dir.path().join("release-changelog-app-1.2.0.md");
        assert_eq!(fs::read_to_string(&leftover).unwrap(), "first draft");

        let edited = CommandEditor::new("true")
            .in_dir(dir.path())
            .for_release("app-1.2.0")
            .edit("fresh draft")
            .unwrap();
        assert_eq!(edited, "first draft");
        assert!(!leftover.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_arguments_split_on_whitespace() {
        // Runs `sh -c true <draft>`
        let dir = tempfile::TempDir::new().unwrap();
        let edited = CommandEditor::new("sh  -c true")
            .in_dir(dir.path())
            .edit("kept")
            .unwrap();
        assert_eq!(edited, "kept");
    }

    #[cfg(unix)]
    #[test]
    fn test_other_release_starts_fresh() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("release-changelog-app-1.2.0.md"), "old").unwrap();

        let edited = CommandEditor::new("true")
            .in_dir(dir.path())
            .for_release("app-1.3.0")
            .edit("new")
            .unwrap();
        assert_eq!(edited, "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_draft_is_refused() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("elsewhere");
        fs::write(&target, "secret").unwrap();

        let editor = CommandEditor::new("true").in_dir(dir.path());
        std::os::unix::fs::symlink(&target, editor.draft_path()).unwrap();

        let err = editor.edit("draft").unwrap_err();
        assert!(err.to_string().contains("symlink"));
        assert_eq!(fs::read_to_string(&target).unwrap(), "secret");
    }

    #[test]
    fn test_release_key_is_sanitised() {
        let editor = CommandEditor::new("true")
            .in_dir("/drafts")
            .for_release("my app/1.0.0+build");
        assert_eq!(
            editor.draft_path(),
            PathBuf::from("/drafts/release-changelog-my_app_1.0.0_build.md")
        );
    }

    #[test]
    #[serial(editor_env)]
    fn test_editor_resolution_order() {
        let saved: Vec<(&str, Option<String>)> = [VISUAL_ENV_VAR, EDITOR_ENV_VAR]
            .into_iter()
            .map(|var| (var, env::var(var).ok()))
            .collect();

        env::set_var(VISUAL_ENV_VAR, "code --wait");
        env::set_var(EDITOR_ENV_VAR, "nano");
        assert_eq!(CommandEditor::from_env().command(), "code --wait");

        env::set_var(VISUAL_ENV_VAR, "   ");
        assert_eq!(CommandEditor::from_env().command(), "nano");

        env::remove_var(VISUAL_ENV_VAR);
        assert_eq!(CommandEditor::from_env().command(), "nano");

        env::remove_var(EDITOR_ENV_VAR);
        assert_eq!(CommandEditor::from_env().command(), "vi");

        for (var, value) in saved {
            match value {
                Some(value) => env::set_var(var, value),
                None => env::remove_var(var),
            }
        }
    }
}
