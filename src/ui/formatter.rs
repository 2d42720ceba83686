//! Pure formatting functions for UI output.
//!
//! Everything here returns strings so it can be tested without a terminal.
//! Styling goes through `console`, which drops colours when output is not a TTY.

use crate::conventional::{Classification, CommitKind, MalformedCommit, ParsedCommit};
use crate::domain::ReleaseTag;
use console::style;

/// Longest summary shown before truncating
const MAX_SUMMARY_CHARS: usize = 72;

fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_SUMMARY_CHARS {
        let cut: String = text.chars().take(MAX_SUMMARY_CHARS - 1).collect();
        format!("{}…", cut)
    } else {
        text.to_string()
    }
}

pub fn format_latest_release(tag: Option<&ReleaseTag>) -> String {
    match tag {
        Some(tag) => format!(
            "Latest release: {} ({})",
            style(tag.name()).green().bold(),
            &tag.target().to_string()[..7]
        ),
        None => format!("Latest release: {}", style("none").yellow()),
    }
}

/// One parsed commit, `!` marking breaking changes
pub fn format_parsed_commit(commit: &ParsedCommit) -> String {
    let marker = if commit.breaking {
        style("!").red().bold().to_string()
    } else {
        " ".to_string()
    };

    format!(
        "  {}{} {}",
        style(commit.commit.short_hash()).dim(),
        marker,
        truncate(commit.commit.summary())
    )
}

pub fn format_malformed_commit(commit: &MalformedCommit) -> String {
    let summary = commit.message.lines().next().unwrap_or_default();
    let hash = commit.hash.to_string();
    format!(
        "  {}  {} ({})",
        style(&hash[..7]).dim(),
        truncate(summary),
        style(&commit.reason).yellow()
    )
}

/// Parsed commits grouped under one heading per kind, empty kinds omitted
pub fn format_classification(classification: &Classification) -> Vec<String> {
    let mut lines = Vec::new();

    for kind in CommitKind::ALL {
        let commits: Vec<&ParsedCommit> = classification.of_kind(kind).collect();
        if commits.is_empty() {
            continue;
        }

        lines.push(format!("{} ({})", style(kind).bold(), commits.len()));
        lines.extend(commits.into_iter().map(format_parsed_commit));
    }

    if !classification.malformed.is_empty() {
        lines.push(format!(
            "{} ({})",
            style("malformed").yellow().bold(),
            classification.malformed.len()
        ));
        lines.extend(classification.malformed.iter().map(format_malformed_commit));
    }

    lines
}

pub fn format_next_version(version: Option<&str>, explicit: bool) -> String {
    match (version, explicit) {
        (Some(v), true) => format!("Next version: {}", style(v).green().bold()),
        (Some(v), false) => format!("Proposed next version: {}", style(v).green().bold()),
        (None, _) => format!(
            "Proposed next version: {} (no previous release; pass --semver)",
            style("none").yellow()
        ),
    }
}
