//! Release planning workflow
//!
//! Kept apart from `main.rs` so the workflow can be driven without clap.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::boundary::BoundaryWarning;
use crate::changelog::{ChangelogDraft, ChangelogEditor, CommandEditor};
use crate::config::Config;
use crate::git::{Git2Repository, Repository};
use crate::release::{ReleasePlan, ReleaseResolver};

/// Arguments for the planning workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanWorkflowArgs {
    /// Path inside the repository to inspect
    pub repo_path: PathBuf,

    /// Version chosen by the caller instead of the proposal
    pub semver: Option<String>,

    /// Open the changelog draft in an editor
    pub edit: bool,
}

/// Result of a successful planning run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub plan: ReleasePlan,
    pub warnings: Vec<BoundaryWarning>,
    /// Edited changelog text when editing was requested
    pub changelog: Option<String>,
}

/// Run the workflow against the repository at `args.repo_path`
pub fn run_plan_workflow(args: &PlanWorkflowArgs, config: &Config) -> Result<WorkflowResult> {
    let repo = Git2Repository::open(&args.repo_path).with_context(|| {
        format!(
            "Could not open a git repository at '{}'",
            args.repo_path.display()
        )
    })?;

    let mut result = plan_with(&repo, args.semver.as_deref(), config, None)?;

    if args.edit {
        let editor = match &config.changelog.editor {
            Some(command) => CommandEditor::new(command.clone()),
            None => CommandEditor::from_env(),
        }
        .for_release(&draft_key(&args.repo_path, &result.plan));

        result.changelog = Some(edit_changelog(&result.plan, &editor)?);
    }

    Ok(result)
}

/// Workflow body over any repository and editor
pub fn plan_with<R: Repository + ?Sized>(
    repo: &R,
    semver: Option<&str>,
    config: &Config,
    editor: Option<&dyn ChangelogEditor>,
) -> Result<WorkflowResult> {
    let bump = config.version.bump()?;
    let resolver = ReleaseResolver::new(repo).with_tag_filter(config.tags.filter());

    let plan = resolver
        .plan(semver, &bump)
        .context("Could not resolve the commits since the latest release")?;

    info!(
        "Resolved {} commits since {}",
        plan.range.len(),
        plan.latest_tag().map(|t| t.name()).unwrap_or("the beginning")
    );

    let warnings = collect_warnings(&plan);

    let changelog = match editor {
        Some(editor) => Some(edit_changelog(&plan, editor)?),
        None => None,
    };

    Ok(WorkflowResult {
        plan,
        warnings,
        changelog,
    })
}

fn edit_changelog(plan: &ReleasePlan, editor: &dyn ChangelogEditor) -> Result<String> {
    let draft = ChangelogDraft::from_commits(&plan.range.commits);
    debug!("Opening changelog draft with {} lines", draft.short_lines.len());
    editor.edit(&draft.text()).context("Could not edit changelog")
}

/// `<project>-<version>`, naming the draft file of one release
fn draft_key(repo_path: &Path, plan: &ReleasePlan) -> String {
    let project = repo_path
        .canonicalize()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "project".to_string());

    format!("{}-{}", project, plan.next_version().unwrap_or("unreleased"))
}

fn collect_warnings(plan: &ReleasePlan) -> Vec<BoundaryWarning> {
    let mut warnings = Vec::new();

    match plan.latest_tag() {
        None => warnings.push(BoundaryWarning::NoPriorRelease {
            ignored_tags: plan.ignored_tags,
        }),
        Some(tag) => {
            // An empty range under a tag means HEAD is the tagged commit
            if plan.range.is_empty() {
                warnings.push(BoundaryWarning::NoNewCommits {
                    latest_tag: tag.name().to_string(),
                    current_commit_hash: tag.target().to_string(),
                });
            }
            if plan.ignored_tags > 0 {
                warnings.push(BoundaryWarning::IgnoredTags {
                    count: plan.ignored_tags,
                });
            }
        }
    }

    let malformed = plan.classification.malformed.len();
    if malformed > 0 {
        warnings.push(BoundaryWarning::MalformedCommits {
            count: malformed,
            total: plan.classification.total(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::PassthroughEditor;
    use crate::domain::Commit;
    use crate::git::MockRepository;
    use git2::Oid;

    fn oid(byte: u8) -> Oid {
        Oid::from_bytes(&[byte; 20]).unwrap()
    }

    fn repo() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.add_commit(Commit::new(oid(1), "feat: one").committed_at(100));
        repo.add_commit(
            Commit::new(oid(2), "oops")
                .with_parents(vec![oid(1)])
                .committed_at(200),
        );
        repo.set_head(oid(2));
        repo
    }

    #[test]
    fn test_warns_when_no_release_exists() {
        let mut repo = repo();
        repo.add_tag("nightly", oid(1));

        let result = plan_with(&repo, None, &Config::default(), None).unwrap();
        assert_eq!(
            result.warnings,
            vec![BoundaryWarning::NoPriorRelease { ignored_tags: 1 }]
        );
        assert!(result.changelog.is_none());
    }

    #[test]
    fn test_warns_when_head_is_tagged() {
        let mut repo = repo();
        repo.add_tag("v1.0.0", oid(2));

        let result = plan_with(&repo, None, &Config::default(), None).unwrap();
        assert_eq!(
            result.warnings,
            vec![BoundaryWarning::NoNewCommits {
                latest_tag: "v1.0.0".to_string(),
                current_commit_hash: oid(2).to_string(),
            }]
        );
    }

    #[test]
    fn test_reports_malformed_commits_and_drafts_changelog() {
        let mut repo = repo();
        repo.add_tag("v1.0.0", oid(1));

        let result = plan_with(
            &repo,
            None,
            &Config::default(),
            Some(&PassthroughEditor as &dyn ChangelogEditor),
        )
        .unwrap();

        assert_eq!(
            result.warnings,
            vec![BoundaryWarning::MalformedCommits { count: 1, total: 1 }]
        );
        assert_eq!(result.plan.next_version(), Some("1.1.0"));
        assert_eq!(result.changelog.as_deref(), Some("0202020: oops"));
    }

    #[test]
    fn test_warns_about_ignored_tags_next_to_a_release() {
        let mut repo = repo();
        repo.add_commit(
            Commit::new(oid(3), "fix: three")
                .with_parents(vec![oid(2)])
                .committed_at(300),
        );
        repo.set_head(oid(3));
        repo.add_tag("v1.0.0", oid(2));
        repo.add_tag("nightly", oid(1));
        repo.add_tag("deploy-42", oid(3));

        let result = plan_with(&repo, None, &Config::default(), None).unwrap();
        assert_eq!(
            result.warnings,
            vec![BoundaryWarning::IgnoredTags { count: 2 }]
        );
    }

    #[test]
    fn test_draft_key_uses_next_version() {
        let mut repo = repo();
        repo.add_tag("v1.0.0", oid(1));
        let result = plan_with(&repo, None, &Config::default(), None).unwrap();

        let dir = tempfile::TempDir::new().unwrap();
        let project = dir.path().join("widget");
        std::fs::create_dir(&project).unwrap();

        assert_eq!(draft_key(&project, &result.plan), "widget-1.1.0");
        assert_eq!(
            draft_key(&project.join("missing"), &result.plan),
            "project-1.1.0"
        );
    }

    #[test]
    fn test_configured_increment_is_used() {
        let mut repo = repo();
        repo.add_tag("v1.0.0", oid(1));
        let mut config = Config::default();
        config.version.increment = "patch".to_string();

        let result = plan_with(&repo, None, &config, None).unwrap();
        assert_eq!(result.plan.next_version(), Some("1.0.1"));
    }

    #[test]
    fn test_tag_not_in_history_is_fatal() {
        let mut repo = repo();
        repo.add_commit(Commit::new(oid(7), "elsewhere"));
        repo.add_tag("v1.0.0", oid(7));

        let err = plan_with(&repo, None, &Config::default(), None).unwrap_err();
        let root = err
            .downcast_ref::<crate::error::ReleaseError>()
            .expect("release error at the root");
        assert!(root.is_tag_not_in_history());
    }
}
