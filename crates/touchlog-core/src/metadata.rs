//! Entry metadata (user, host, git context) and its collection boundary.

use crate::config::MetadataSection;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub user: String,
    pub host: String,
    pub git: Option<GitContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitContext {
    pub branch: String,
    pub commit: String,
}

/// Supplies metadata for an output directory.
///
/// Implementations swallow their own failures and return empty fields.
pub trait MetadataSource {
    fn collect(&self, options: &MetadataSection, output_dir: &str) -> Metadata;
}

/// Source that never reports anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl MetadataSource for NoMetadata {
    fn collect(&self, _options: &MetadataSection, _output_dir: &str) -> Metadata {
        Metadata::default()
    }
}

impl Metadata {
    /// Non-empty fields as `(variable name, value)` pairs.
    pub fn variables(&self) -> Vec<(&'static str, &str)> {
        let mut vars = Vec::new();
        if !self.user.is_empty() {
            vars.push(("user", self.user.as_str()));
        }
        if !self.host.is_empty() {
            vars.push(("host", self.host.as_str()));
        }
        if let Some(git) = &self.git {
            if !git.branch.is_empty() {
                vars.push(("branch", git.branch.as_str()));
            }
            if !git.commit.is_empty() {
                vars.push(("commit", git.commit.as_str()));
            }
        }
        vars
    }
}
