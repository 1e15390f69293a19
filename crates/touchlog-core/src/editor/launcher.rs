//! Handing a file to the resolved editor.

use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Result, TouchlogError};

use super::internal::LineEditor;
use super::resolver::EditorDecision;

/// Opens a file for editing and returns its content afterwards.
pub trait EditorLauncher {
    fn edit(&mut self, path: &Path) -> Result<String>;
}

/// Spawn `command args... path` on the current terminal and wait for it.
///
/// The file is never removed here, whatever the editor does.
pub fn launch(command: &Path, args: &[String], path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(TouchlogError::io(
            "cannot open missing file",
            path,
            io::Error::from(io::ErrorKind::NotFound),
        ));
    }

    let display = command.display().to_string();
    log::debug!("launching {} {:?} {}", display, args, path.display());

    let status = Command::new(command)
        .args(args)
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| TouchlogError::EditorLaunch {
            command: display.clone(),
            source,
        })?;

    if !status.success() {
        return Err(TouchlogError::EditorExited {
            command: display,
            status: status.to_string(),
        });
    }
    Ok(())
}

/// Launcher bound to the process terminal.
#[derive(Debug, Clone)]
pub struct TerminalLauncher {
    decision: EditorDecision,
}

impl TerminalLauncher {
    pub fn new(decision: EditorDecision) -> Self {
        Self { decision }
    }

    pub fn decision(&self) -> &EditorDecision {
        &self.decision
    }
}

impl EditorLauncher for TerminalLauncher {
    fn edit(&mut self, path: &Path) -> Result<String> {
        match &self.decision {
            EditorDecision::External { command, args } => {
                launch(command, args, path)?;
                fs::read_to_string(path).map_err(|e| TouchlogError::io("failed to read", path, e))
            }
            EditorDecision::Internal => {
                let stdin = io::stdin();
                let stdout = io::stdout();
                LineEditor::open(path, stdin.lock(), stdout.lock())?.run()
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_launch_passes_args_before_path() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("entry.md");
        fs::write(&file, "before\n").unwrap();

        // `sh -c 'printf x >> "$1"' sh <file>` appends to the file.
        let args = vec![
            "-c".to_string(),
            "printf edited >> \"$1\"".to_string(),
            "sh".to_string(),
        ];
        launch(Path::new("/bin/sh"), &args, &file).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "before\nedited");
    }

    #[test]
    fn test_nonzero_exit_keeps_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("entry.md");
        fs::write(&file, "content").unwrap();

        let args = vec!["-c".to_string(), "exit 3".to_string()];
        let err = launch(Path::new("/bin/sh"), &args, &file).unwrap_err();
        assert!(matches!(err, TouchlogError::EditorExited { .. }));
        assert_eq!(fs::read_to_string(&file).unwrap(), "content");
    }

    #[test]
    fn test_spawn_failure_is_launch_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("entry.md");
        fs::write(&file, "content").unwrap();

        let err = launch(&PathBuf::from("/nonexistent/editor"), &[], &file).unwrap_err();
        assert!(matches!(err, TouchlogError::EditorLaunch { .. }));
        assert!(file.exists());
    }

    #[test]
    fn test_terminal_launcher_returns_new_content() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("entry.md");
        fs::write(&file, "old").unwrap();

        let mut launcher = TerminalLauncher::new(EditorDecision::External {
            command: PathBuf::from("/bin/sh"),
            args: vec![
                "-c".to_string(),
                "printf new > \"$1\"".to_string(),
                "sh".to_string(),
            ],
        });
        assert_eq!(launcher.edit(&file).unwrap(), "new");
    }
}
