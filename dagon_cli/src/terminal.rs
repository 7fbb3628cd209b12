//! Terminal detection
//!
//! Colors and the progress spinner are only used on a real terminal outside
//! of CI.

use is_terminal::IsTerminal;
use std::env;
use std::io::{stderr, stdout};

/// Variables set by common CI runners, which may allocate a TTY
const CI_VARIABLES: &[&str] = &[
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
    "TF_BUILD",
];

/// Whether stdout is a terminal a person is looking at
pub fn is_interactive() -> bool {
    stdout().is_terminal()
        && !is_ci_environment()
        && env::var("DEBIAN_FRONTEND").ok().as_deref() != Some("noninteractive")
}

/// Whether escape codes can be written to stdout
pub fn supports_ansi() -> bool {
    is_interactive() && term_supports_ansi(env::var("TERM").ok().as_deref())
}

fn term_supports_ansi(term: Option<&str>) -> bool {
    match term {
        Some("dumb") => false,
        Some(term) if !term.is_empty() => true,
        // Windows consoles rarely set TERM
        _ => cfg!(windows),
    }
}

/// The spinner is drawn on stderr
pub fn stderr_is_terminal() -> bool {
    stderr().is_terminal()
}

fn is_ci_environment() -> bool {
    CI_VARIABLES.iter().any(|name| env::var_os(name).is_some())
}

/// Whether `dagon crack` shows its spinner when not told otherwise
pub fn should_show_progress_by_default() -> bool {
    stderr_is_terminal() && supports_ansi()
}

/// Whether colored output should be produced
///
/// `NO_COLOR` wins over the configuration.
pub fn should_use_color(color_enabled: bool) -> bool {
    color_enabled && env::var_os("NO_COLOR").is_none() && supports_ansi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_values() {
        assert!(!term_supports_ansi(Some("dumb")));
        assert!(term_supports_ansi(Some("xterm-256color")));
        assert_eq!(term_supports_ansi(None), cfg!(windows));
        assert_eq!(term_supports_ansi(Some("")), cfg!(windows));
    }

    #[test]
    fn test_detection_does_not_panic() {
        let _ = is_interactive();
        let _ = stderr_is_terminal();
        let _ = should_show_progress_by_default();
    }

    #[test]
    fn test_color_disabled_by_config() {
        assert!(!should_use_color(false));
    }
}
