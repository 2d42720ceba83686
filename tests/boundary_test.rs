use release_range::boundary::BoundaryWarning;

#[test]
fn test_no_new_commits_display() {
    let warning = BoundaryWarning::NoNewCommits {
        latest_tag: "v1.0.0".to_string(),
        current_commit_hash: "abc1234def5678".to_string(),
    };

    let display_msg = warning.to_string();
    assert_eq!(
        display_msg,
        "No new commits since tag 'v1.0.0' (current: abc1234)"
    );
}

#[test]
fn test_no_new_commits_short_hash_is_kept() {
    let warning = BoundaryWarning::NoNewCommits {
        latest_tag: "v1.0.0".to_string(),
        current_commit_hash: "abc".to_string(),
    };
    assert!(warning.to_string().ends_with("(current: abc)"));
}

#[test]
fn test_no_prior_release_display() {
    let bare = BoundaryWarning::NoPriorRelease { ignored_tags: 0 };
    assert_eq!(bare.to_string(), "No previous release found");

    let with_ignored = BoundaryWarning::NoPriorRelease { ignored_tags: 3 };
    assert_eq!(
        with_ignored.to_string(),
        "No previous release found (3 non-semver tags ignored)"
    );
}

#[test]
fn test_malformed_commits_display() {
    let warning = BoundaryWarning::MalformedCommits { count: 2, total: 5 };
    assert_eq!(
        warning.to_string(),
        "2 of 5 commits do not follow the conventional format"
    );
}

#[test]
fn test_warnings_are_comparable() {
    assert_eq!(
        BoundaryWarning::MalformedCommits { count: 1, total: 1 },
        BoundaryWarning::MalformedCommits { count: 1, total: 1 }
    );
    assert_ne!(
        BoundaryWarning::NoPriorRelease { ignored_tags: 0 },
        BoundaryWarning::NoPriorRelease { ignored_tags: 1 }
    );
}

#[test]
fn test_ignored_tags_display() {
    let warning = BoundaryWarning::IgnoredTags { count: 2 };
    assert_eq!(warning.to_string(), "2 non-semver tags ignored");
}
