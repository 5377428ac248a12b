//! Terminal output: status messages, the extraction progress bar and the
//! end-of-run summary. Everything is written to stderr.

mod format;
mod messages;
mod progress;

pub use format::{format_duration, print_summary};
pub use messages::{info, success, warning};
pub use progress::AnalysisProgress;

/// Whether interactive decorations (progress bars) should be drawn.
pub fn is_interactive(quiet: bool) -> bool {
    !quiet && !is_ci() && console::user_attended_stderr()
}

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}
