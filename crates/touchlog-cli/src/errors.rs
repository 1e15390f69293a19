//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use touchlog_core::TouchlogError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (template, editor)
    NotFound { message: String, hint: String },

    /// Invalid user input, config, or timezone
    InvalidInput {
        message: String,
        hint: Option<String>,
    },

    /// Editor failed; the entry file was kept
    Editor { message: String, hint: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an InvalidInput error with a hint.
    pub fn invalid_input_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Classify a core error. Returns `None` for errors that keep the
    /// generic exit code.
    pub fn from_core(err: &TouchlogError) -> Option<Self> {
        match err {
            TouchlogError::TemplateNotFound(name) => Some(Self::not_found(
                format!("Template '{}' not found", name),
                "Run `touchlog templates` to list available templates.",
            )),
            TouchlogError::EditorNotFound(name) => Some(Self::not_found(
                format!("Editor '{}' not found", name),
                "Pass an installed editor with --editor or set $EDITOR.",
            )),
            TouchlogError::NoEditorFound => Some(Self::not_found(
                "No editor found",
                "Install vi or nano, set $EDITOR, or configure [editor] in config.toml.",
            )),
            TouchlogError::InvalidTimezone(tz) => Some(Self::invalid_input_with_hint(
                format!("Invalid timezone '{}'", tz),
                "Use an IANA name such as America/New_York.",
            )),
            TouchlogError::Config(message) | TouchlogError::Validation(message) => {
                Some(Self::invalid_input(message.clone()))
            }
            TouchlogError::OutputDirRequired => Some(Self::invalid_input_with_hint(
                "Output directory is required",
                "Pass --output-dir or set notes_directory in config.toml.",
            )),
            TouchlogError::EditorLaunch { .. } | TouchlogError::EditorExited { .. } => {
                Some(CliError::Editor {
                    message: err.to_string(),
                    hint: "The entry file was kept; check your editor setting.".to_string(),
                })
            }
            _ => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CliError::NotFound { message, .. }
            | CliError::InvalidInput { message, .. }
            | CliError::Editor { message, .. } => message,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } | CliError::Editor { hint, .. } => Some(hint),
            CliError::InvalidInput { hint, .. } => hint.as_deref(),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput { .. } => exit_codes::INVALID_INPUT,
            CliError::Editor { .. } => exit_codes::EDITOR_FAILED,
        }
    }
}
