//! Terminal output for the release-range binary

pub mod formatter;

use crate::boundary::BoundaryWarning;
use crate::release::ReleasePlan;
use console::style;

pub use formatter::{format_classification, format_latest_release, format_next_version};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print the resolved plan: latest release, classified commits, next version
pub fn display_plan(plan: &ReleasePlan) {
    println!("{}", format_latest_release(plan.latest_tag()));

    if plan.range.has_prior_release() {
        println!(
            "\n{}",
            style(format!("{} commits since last release:", plan.range.len())).underlined()
        );
        for line in format_classification(&plan.classification) {
            println!("{}", line);
        }
    }

    println!(
        "\n{}",
        format_next_version(plan.next_version(), plan.explicit_version.is_some())
    );
}

/// Print the changelog text after editing
pub fn display_changelog(text: &str) {
    println!("\n{}", style("Changelog:").bold());
    for line in text.lines() {
        println!("  {}", line);
    }
}
