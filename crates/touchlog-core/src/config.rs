//! Typed configuration consumed by the entry-creation engine.
//!
//! Reading and writing the file is the CLI's job; this module only defines
//! the shape, defaults, and validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TouchlogError};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_NOTES_DIRECTORY: &str = "~/notes";

/// Variable names generated by the system; custom variables may not use them.
pub const RESERVED_VARIABLES: [&str; 3] = ["date", "time", "datetime"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchlogConfig {
    pub default_template: Option<String>,
    pub notes_directory: Option<String>,
    pub timezone: Option<String>,
    pub templates: Vec<TemplateFile>,
    pub inline_templates: BTreeMap<String, String>,
    pub variables: BTreeMap<String, String>,
    pub datetime_vars: DateTimeVars,
    pub editor: Option<EditorCommand>,
    pub metadata: MetadataSection,
    pub vim_mode: bool,
}

/// A template stored as a file in the templates directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFile {
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateTimeVars {
    pub date: DateTimeVar,
    pub time: DateTimeVar,
    pub datetime: DateTimeVar,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateTimeVar {
    /// `None` means enabled.
    pub enabled: Option<bool>,
    /// chrono strftime pattern.
    pub format: Option<String>,
}

impl DateTimeVar {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// Editor command with fixed arguments placed before the target file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorCommand {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSection {
    pub include_user: bool,
    pub include_host: bool,
    pub include_git: bool,
}

impl Default for MetadataSection {
    fn default() -> Self {
        Self {
            include_user: true,
            include_host: true,
            include_git: false,
        }
    }
}

impl TouchlogConfig {
    /// Default config written by `touchlog init`.
    pub fn starter() -> Self {
        Self {
            default_template: Some("daily".to_string()),
            notes_directory: Some(DEFAULT_NOTES_DIRECTORY.to_string()),
            templates: vec![
                TemplateFile {
                    name: "daily".to_string(),
                    file: "daily.md".to_string(),
                },
                TemplateFile {
                    name: "meeting".to_string(),
                    file: "meeting.md".to_string(),
                },
                TemplateFile {
                    name: "journal".to_string(),
                    file: "journal.md".to_string(),
                },
            ],
            ..Self::default()
        }
    }

    /// Reject reserved custom variable names and empty editor commands.
    pub fn validate(&self) -> Result<()> {
        for name in self.variables.keys() {
            if RESERVED_VARIABLES.contains(&name.as_str()) {
                return Err(TouchlogError::Config(format!(
                    "variable name '{}' is reserved and cannot be used",
                    name
                )));
            }
        }
        if let Some(editor) = &self.editor {
            if editor.command.trim().is_empty() {
                return Err(TouchlogError::Config(
                    "editor.command cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn notes_directory(&self) -> &str {
        self.notes_directory
            .as_deref()
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or(DEFAULT_NOTES_DIRECTORY)
    }

    pub fn default_template(&self) -> Option<&str> {
        self.default_template
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}
