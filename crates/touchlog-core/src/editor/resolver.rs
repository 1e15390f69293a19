//! Editor resolution chain.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::config::EditorCommand;
use crate::error::{Result, TouchlogError};

/// Editors tried on the search path when nothing else is configured.
pub const PATH_EDITORS: [&str; 2] = ["vi", "nano"];

/// Outcome of resolving an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorDecision {
    /// Spawn `command` with `args` followed by the file path.
    External { command: PathBuf, args: Vec<String> },
    /// Use the built-in line editor.
    Internal,
}

/// Finds executables by name or path.
pub trait PathLookup {
    fn find(&self, name: &str) -> Option<PathBuf>;
}

/// Looks names up on `PATH` and paths on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPathLookup;

impl PathLookup for SystemPathLookup {
    fn find(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        if name.contains(MAIN_SEPARATOR) {
            let path = Path::new(name);
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir().ok()?.join(path)
            };
            return path.exists().then_some(path);
        }
        which::which(name).ok()
    }
}

/// Split an editor string into the command and its fixed arguments.
pub fn parse_editor_string(raw: &str) -> Option<(String, Vec<String>)> {
    let mut parts = raw.split_whitespace().map(str::to_string);
    let command = parts.next()?;
    Some((command, parts.collect()))
}

/// Resolves which editor to use.
///
/// Precedence: CLI override, `EDITOR`, configured command, `vi`, `nano`,
/// then the internal editor when fallback is allowed. Only the CLI
/// override fails hard when it cannot be found.
#[derive(Debug, Clone)]
pub struct EditorResolver<L> {
    lookup: L,
    cli_override: Option<String>,
    env_editor: Option<String>,
    config_editor: Option<EditorCommand>,
    fallback_to_internal: bool,
}

impl<L: PathLookup> EditorResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            cli_override: None,
            env_editor: None,
            config_editor: None,
            fallback_to_internal: false,
        }
    }

    pub fn cli_override(mut self, editor: Option<&str>) -> Self {
        self.cli_override = non_blank(editor);
        self
    }

    pub fn env_editor(mut self, editor: Option<&str>) -> Self {
        self.env_editor = non_blank(editor);
        self
    }

    /// Take the `EDITOR` environment variable.
    pub fn with_process_env(self) -> Self {
        let editor = std::env::var("EDITOR").ok();
        self.env_editor(editor.as_deref())
    }

    pub fn config_editor(mut self, editor: Option<&EditorCommand>) -> Self {
        self.config_editor = editor
            .filter(|e| !e.command.trim().is_empty())
            .cloned();
        self
    }

    pub fn fallback_to_internal(mut self, fallback: bool) -> Self {
        self.fallback_to_internal = fallback;
        self
    }

    pub fn resolve(&self) -> Result<EditorDecision> {
        if let Some(raw) = &self.cli_override {
            return self
                .external_from_string(raw)
                .ok_or_else(|| TouchlogError::EditorNotFound(raw.clone()));
        }

        if let Some(raw) = &self.env_editor {
            if let Some(decision) = self.external_from_string(raw) {
                return Ok(decision);
            }
            log::warn!("EDITOR '{}' not found, trying other editors", raw);
        }

        if let Some(editor) = &self.config_editor {
            if let Some(command) = self.lookup.find(editor.command.trim()) {
                return Ok(EditorDecision::External {
                    command,
                    args: editor.args.clone(),
                });
            }
            log::warn!("configured editor '{}' not found", editor.command);
        }

        for name in PATH_EDITORS {
            if let Some(command) = self.lookup.find(name) {
                return Ok(EditorDecision::External {
                    command,
                    args: Vec::new(),
                });
            }
        }

        if self.fallback_to_internal {
            log::info!("no external editor found, using the internal editor");
            return Ok(EditorDecision::Internal);
        }
        Err(TouchlogError::NoEditorFound)
    }

    fn external_from_string(&self, raw: &str) -> Option<EditorDecision> {
        let (name, args) = parse_editor_string(raw)?;
        let command = self.lookup.find(&name)?;
        Some(EditorDecision::External { command, args })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeLookup(HashMap<&'static str, &'static str>);

    impl FakeLookup {
        fn with(names: &[(&'static str, &'static str)]) -> Self {
            Self(names.iter().copied().collect())
        }
    }

    impl PathLookup for FakeLookup {
        fn find(&self, name: &str) -> Option<PathBuf> {
            self.0.get(name).map(PathBuf::from)
        }
    }

    fn external(command: &str, args: &[&str]) -> EditorDecision {
        EditorDecision::External {
            command: PathBuf::from(command),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_editor_string() {
        assert_eq!(
            parse_editor_string("code --wait  -n"),
            Some(("code".to_string(), vec!["--wait".to_string(), "-n".to_string()]))
        );
        assert_eq!(parse_editor_string("   "), None);
    }

    #[test]
    fn test_cli_override_wins() {
        let resolver = EditorResolver::new(FakeLookup::with(&[
            ("hx", "/usr/bin/hx"),
            ("vi", "/usr/bin/vi"),
        ]))
        .cli_override(Some("hx --vsplit"))
        .env_editor(Some("vi"));
        assert_eq!(resolver.resolve().unwrap(), external("/usr/bin/hx", &["--vsplit"]));
    }

    #[test]
    fn test_missing_cli_override_never_falls_through() {
        for fallback in [true, false] {
            let resolver = EditorResolver::new(FakeLookup::with(&[("vi", "/usr/bin/vi")]))
                .cli_override(Some("no-such-editor"))
                .fallback_to_internal(fallback);
            let err = resolver.resolve().unwrap_err();
            assert!(matches!(err, TouchlogError::EditorNotFound(ref e) if e == "no-such-editor"));
        }
    }

    #[test]
    fn test_missing_env_editor_falls_through() {
        let resolver = EditorResolver::new(FakeLookup::with(&[("nano", "/bin/nano")]))
            .env_editor(Some("ghost-editor"));
        assert_eq!(resolver.resolve().unwrap(), external("/bin/nano", &[]));
    }

    #[test]
    fn test_config_editor_keeps_args() {
        let config = EditorCommand {
            command: "emacs".to_string(),
            args: vec!["-nw".to_string()],
        };
        let resolver = EditorResolver::new(FakeLookup::with(&[
            ("emacs", "/usr/bin/emacs"),
            ("vi", "/usr/bin/vi"),
        ]))
        .config_editor(Some(&config));
        assert_eq!(resolver.resolve().unwrap(), external("/usr/bin/emacs", &["-nw"]));
    }

    #[test]
    fn test_vi_preferred_over_nano() {
        let resolver = EditorResolver::new(FakeLookup::with(&[
            ("nano", "/bin/nano"),
            ("vi", "/bin/vi"),
        ]));
        assert_eq!(resolver.resolve().unwrap(), external("/bin/vi", &[]));
    }

    #[test]
    fn test_internal_fallback_when_nothing_found() {
        let resolver = EditorResolver::new(FakeLookup::default()).fallback_to_internal(true);
        assert_eq!(resolver.resolve().unwrap(), EditorDecision::Internal);

        let resolver = EditorResolver::new(FakeLookup::default());
        assert!(matches!(resolver.resolve(), Err(TouchlogError::NoEditorFound)));
    }

    #[test]
    fn test_system_lookup_paths() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("my-editor");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();

        let lookup = SystemPathLookup;
        assert_eq!(lookup.find(script.to_str().unwrap()), Some(script.clone()));
        assert_eq!(lookup.find(dir.path().join("absent").to_str().unwrap()), None);
        assert_eq!(lookup.find(""), None);
    }
}
