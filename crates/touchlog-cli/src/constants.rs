//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success (saved, kept, or cancelled)
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells and clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (template, editor).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, configuration, or timezone.
    pub const INVALID_INPUT: i32 = 4;

    /// Editor failed to launch or exited unsuccessfully.
    pub const EDITOR_FAILED: i32 = 5;
}

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TOUCHLOG_CONFIG";

/// Application directory name under XDG locations.
pub const APP_DIR: &str = "touchlog";
