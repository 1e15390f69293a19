//! Error types for touchlog core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps them to
//! user-facing messages and exit codes via [`ErrorCategory`].

use std::path::PathBuf;

use thiserror::Error;

use crate::wizard::State;

/// Result type alias for touchlog operations.
pub type Result<T> = std::result::Result<T, TouchlogError>;

/// Core error type for touchlog operations.
#[derive(Debug, Error)]
pub enum TouchlogError {
    /// Transition not present in the legality table
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: State, to: State },

    /// Back navigation requested from a state that does not allow it
    #[error("back navigation not allowed from state {0}")]
    BackNavigationNotAllowed(State),

    /// Per-step validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Output directory was never provided
    #[error("output directory is required")]
    OutputDirRequired,

    /// Confirm or edit requested before a temp file exists
    #[error("no temporary file to {0}")]
    NoTempFile(&'static str),

    /// No template matched the requested name
    #[error("template '{0}' not found")]
    TemplateNotFound(String),

    /// A specific editor command could not be resolved to an executable
    #[error("editor '{0}' not found")]
    EditorNotFound(String),

    /// Nothing in the resolution chain produced an editor
    #[error("no editor found and fallback to internal editor is disabled")]
    NoEditorFound,

    /// Timezone string could not be parsed as an IANA name
    #[error("invalid timezone '{0}'")]
    InvalidTimezone(String),

    /// Editor process could not be spawned
    #[error("failed to launch editor '{command}': {source}")]
    EditorLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Editor process exited unsuccessfully
    #[error("editor '{command}' exited with {status}")]
    EditorExited { command: String, status: String },

    /// Filesystem failure with the path involved
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),
}

/// Coarse classification used to decide between re-prompting and aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Recovered locally by re-prompting the same step
    State,
    /// Surfaced to the user; the session aborts but keeps its temp file
    Resolution,
    /// Surfaced verbatim; never retried
    Filesystem,
    /// Editor failures; the file is preserved
    Process,
}

impl TouchlogError {
    /// Build an [`TouchlogError::Io`] from an action description and path.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TouchlogError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TouchlogError::InvalidTransition { .. }
            | TouchlogError::BackNavigationNotAllowed(_)
            | TouchlogError::Validation(_)
            | TouchlogError::OutputDirRequired => ErrorCategory::State,
            TouchlogError::TemplateNotFound(_)
            | TouchlogError::EditorNotFound(_)
            | TouchlogError::NoEditorFound
            | TouchlogError::InvalidTimezone(_)
            | TouchlogError::NoTempFile(_)
            | TouchlogError::Config(_) => ErrorCategory::Resolution,
            TouchlogError::Io { .. } => ErrorCategory::Filesystem,
            TouchlogError::EditorLaunch { .. } | TouchlogError::EditorExited { .. } => {
                ErrorCategory::Process
            }
        }
    }
}
