//! Metadata collection from the local system.

use std::path::{Path, PathBuf};
use std::process::Command;

use touchlog_core::config::MetadataSection;
use touchlog_core::{GitContext, Metadata, MetadataSource};

/// Collects user, host, and git context from the running system.
///
/// Every lookup is best-effort; failures leave the field empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMetadata;

impl MetadataSource for SystemMetadata {
    fn collect(&self, options: &MetadataSection, output_dir: &str) -> Metadata {
        let mut meta = Metadata::default();
        if options.include_user {
            meta.user = username().unwrap_or_default();
        }
        if options.include_host {
            meta.host = hostname().unwrap_or_default();
        }
        if options.include_git {
            meta.git = git_context(Path::new(output_dir));
        }
        log::debug!("collected metadata: {:?}", meta);
        meta
    }
}

fn username() -> Option<String> {
    ["USER", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
}

#[cfg(unix)]
fn hostname() -> Option<String> {
    let mut buf = [0u8; 256];
    // SAFETY: buf is valid for buf.len() bytes; gethostname NUL-terminates on success
    let result = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
    if result != 0 {
        log::warn!("gethostname failed");
        return None;
    }
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..len]).trim().to_string();
    (!name.is_empty()).then_some(name)
}

#[cfg(not(unix))]
fn hostname() -> Option<String> {
    std::env::var("COMPUTERNAME").ok()
}

/// Nearest ancestor of `start` (inclusive) holding a `.git` entry.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

fn git_context(output_dir: &Path) -> Option<GitContext> {
    let root = find_git_root(output_dir)?;
    let branch = git(&root, &["rev-parse", "--abbrev-ref", "HEAD"]).unwrap_or_default();
    let commit = git(&root, &["rev-parse", "--short", "HEAD"]).unwrap_or_default();
    if branch.is_empty() && commit.is_empty() {
        return None;
    }
    Some(GitContext { branch, commit })
}

fn git(root: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .map_err(|e| log::warn!("could not run git: {}", e))
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
