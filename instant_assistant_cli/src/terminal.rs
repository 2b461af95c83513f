//! Terminal detection utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::stderr;

/// Check if stderr is connected to a terminal (for progress display)
pub fn stderr_is_terminal() -> bool {
    stderr().is_terminal()
}

/// Check if the terminal supports ANSI escape codes for progress bars
pub fn supports_ansi() -> bool {
    let term = env::var("TERM").unwrap_or_default();

    // Windows consoles leave TERM unset but render ANSI since Windows 10
    #[cfg(windows)]
    {
        term != "dumb"
    }

    #[cfg(not(windows))]
    {
        term != "dumb" && !term.is_empty()
    }
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "TRAVIS",
        "CIRCLECI",
        "BUILDKITE",
        "DRONE",
        "TEAMCITY_VERSION",
        "TF_BUILD", // Azure DevOps
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}

/// Determine if the upload progress bar should be drawn
///
/// Progress goes to stderr, so only stderr has to be a terminal; stdout may
/// be piped to capture the assistant URL.
pub fn should_show_progress_by_default() -> bool {
    stderr_is_terminal() && supports_ansi() && !is_ci_environment()
}
