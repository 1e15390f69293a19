//! Output directory expansion and validation.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TouchlogError};

/// Name of the probe file used to check that a directory accepts writes.
pub const WRITE_PROBE: &str = ".touchlog-write-test";

/// Expand `~`, `~/...`, and `$VAR`/`${VAR}` references, then make the
/// result absolute against the current directory.
///
/// `~user` forms are rejected. Undefined variables expand to nothing.
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = if let Some(rest) = raw.strip_prefix('~') {
        if !rest.is_empty() && !rest.starts_with('/') {
            return Err(TouchlogError::Validation(format!(
                "paths starting with ~ must be followed by / (e.g. ~/notes), got: {}",
                raw
            )));
        }
        let home = home_dir().ok_or_else(|| {
            TouchlogError::Validation("cannot expand ~: HOME is not set".to_string())
        })?;
        let rest = expand_env(rest.trim_start_matches('/'));
        if rest.is_empty() {
            home
        } else {
            home.join(rest)
        }
    } else {
        PathBuf::from(expand_env(raw))
    };

    if expanded.is_absolute() {
        return Ok(expanded);
    }
    let cwd = env::current_dir()
        .map_err(|e| TouchlogError::io("failed to read current directory", ".", e))?;
    Ok(cwd.join(expanded))
}

/// Check that `raw` names a usable output directory.
///
/// An existing directory must accept a probe file; a missing one needs an
/// existing parent directory so it can be created on confirm.
pub fn validate_output_dir(raw: &str) -> Result<PathBuf> {
    if raw.trim().is_empty() {
        return Err(TouchlogError::OutputDirRequired);
    }
    let path = expand_path(raw.trim())?;

    match fs::metadata(&path) {
        Ok(meta) if meta.is_dir() => {
            let probe = path.join(WRITE_PROBE);
            fs::File::create(&probe).map_err(|e| {
                TouchlogError::Validation(format!(
                    "directory is not writable: {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let _ = fs::remove_file(&probe);
            Ok(path)
        }
        Ok(_) => Err(TouchlogError::Validation(format!(
            "path exists but is not a directory: {}",
            path.display()
        ))),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let parent = path.parent().unwrap_or(Path::new("/"));
            match fs::metadata(parent) {
                Ok(meta) if meta.is_dir() => Ok(path),
                Ok(_) => Err(TouchlogError::Validation(format!(
                    "parent path is not a directory: {}",
                    parent.display()
                ))),
                Err(_) => Err(TouchlogError::Validation(format!(
                    "parent directory does not exist: {}",
                    parent.display()
                ))),
            }
        }
        Err(err) => Err(TouchlogError::Validation(format!(
            "failed to check directory {}: {}",
            path.display(),
            err
        ))),
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }

        let name: String = if chars.peek() == Some(&'{') {
            chars.next();
            let mut name = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                name.push(c);
            }
            name
        } else {
            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '_' {
                    name.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            if name.is_empty() {
                out.push('$');
                continue;
            }
            name
        };

        if let Ok(value) = env::var(&name) {
            out.push_str(&value);
        }
    }
    out
}
