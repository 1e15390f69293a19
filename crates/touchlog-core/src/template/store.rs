//! Template lookup across inline, file-based, and built-in sources.

use std::path::{Path, PathBuf};

use crate::config::TouchlogConfig;
use crate::error::{Result, TouchlogError};

/// Name used when neither the session nor the config picks a template.
pub const FALLBACK_TEMPLATE: &str = "daily";

const DAILY: &str = "---
title: \"{{title}}\"
date: {{date}}
tags: [{{tags}}]
---

# {{date}} {{title}}

{{message}}

## Notes

## Tomorrow
";

const MEETING: &str = "---
title: \"{{title}}\"
date: {{datetime}}
tags: [{{tags}}]
---

# Meeting: {{title}}

**When:** {{datetime}}

## Attendees

## Agenda

{{message}}

## Action items
";

const JOURNAL: &str = "# {{date}}

Title: {{title}}

{{message}}
";

/// Templates shipped with the binary, as `(name, body)`.
pub const BUILTIN_TEMPLATES: [(&str, &str); 3] =
    [("daily", DAILY), ("meeting", MEETING), ("journal", JOURNAL)];

/// Where a template body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Inline,
    File(PathBuf),
    Builtin,
}

impl TemplateSource {
    pub fn label(&self) -> &'static str {
        match self {
            TemplateSource::Inline => "inline",
            TemplateSource::File(_) => "file",
            TemplateSource::Builtin => "built-in",
        }
    }
}

/// Resolves template names to template bodies.
#[derive(Debug, Clone)]
pub struct TemplateStore<'a> {
    config: &'a TouchlogConfig,
    templates_dir: Option<PathBuf>,
}

impl<'a> TemplateStore<'a> {
    pub fn new(config: &'a TouchlogConfig, templates_dir: Option<PathBuf>) -> Self {
        Self {
            config,
            templates_dir,
        }
    }

    /// The name to use for a session's selection: the selection itself, else
    /// the configured default, else [`FALLBACK_TEMPLATE`].
    pub fn effective_name<'s>(&'s self, selected: &'s str) -> &'s str {
        let selected = selected.trim();
        if !selected.is_empty() {
            return selected;
        }
        self.config.default_template().unwrap_or(FALLBACK_TEMPLATE)
    }

    /// Where `name` would be loaded from, if anywhere.
    ///
    /// Order: inline template, file-referenced template (by name or file
    /// stem), `<templates dir>/<name>.md`, built-in.
    pub fn locate(&self, name: &str) -> Option<TemplateSource> {
        if self.config.inline_templates.contains_key(name) {
            return Some(TemplateSource::Inline);
        }

        if let Some(dir) = &self.templates_dir {
            let referenced = self
                .config
                .templates
                .iter()
                .find(|t| t.name == name || file_stem(&t.file) == name)
                .map(|t| dir.join(&t.file))
                .filter(|path| path.is_file());
            if let Some(path) = referenced {
                return Some(TemplateSource::File(path));
            }

            let path = dir.join(format!("{}.md", name));
            if path.is_file() {
                return Some(TemplateSource::File(path));
            }
        }

        BUILTIN_TEMPLATES
            .iter()
            .any(|(builtin, _)| *builtin == name)
            .then_some(TemplateSource::Builtin)
    }

    /// Load the body of `name`.
    pub fn resolve(&self, name: &str) -> Result<String> {
        match self.locate(name) {
            Some(TemplateSource::Inline) => {
                log::debug!("using inline template '{}'", name);
                Ok(self
                    .config
                    .inline_templates
                    .get(name)
                    .cloned()
                    .unwrap_or_default())
            }
            Some(TemplateSource::File(path)) => {
                log::debug!("using template file {}", path.display());
                read_template(&path)
            }
            Some(TemplateSource::Builtin) => Ok(BUILTIN_TEMPLATES
                .iter()
                .find(|(builtin, _)| *builtin == name)
                .map(|(_, body)| body.to_string())
                .unwrap_or_default()),
            None => Err(TouchlogError::TemplateNotFound(name.to_string())),
        }
    }

    /// All selectable names: inline, then file-referenced, then built-in.
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut push = |name: String| {
            if !names.contains(&name) {
                names.push(name);
            }
        };

        for name in self.config.inline_templates.keys() {
            push(name.clone());
        }
        for entry in &self.config.templates {
            push(file_stem(&entry.file).to_string());
        }
        for (name, _) in BUILTIN_TEMPLATES {
            push(name.to_string());
        }
        names
    }
}

fn file_stem(file: &str) -> &str {
    Path::new(file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file)
}

fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| TouchlogError::io("failed to read template", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplateFile;
    use tempfile::tempdir;

    #[test]
    fn test_inline_wins() {
        let mut config = TouchlogConfig::default();
        config
            .inline_templates
            .insert("daily".to_string(), "inline {{title}}".to_string());
        let store = TemplateStore::new(&config, None);
        assert_eq!(store.resolve("daily").unwrap(), "inline {{title}}");
    }

    #[test]
    fn test_file_referenced_by_name_and_stem() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("standup.md"), "standup body").unwrap();
        let config = TouchlogConfig {
            templates: vec![TemplateFile {
                name: "Daily Standup".to_string(),
                file: "standup.md".to_string(),
            }],
            ..TouchlogConfig::default()
        };
        let store = TemplateStore::new(&config, Some(dir.path().to_path_buf()));
        assert_eq!(store.resolve("Daily Standup").unwrap(), "standup body");
        assert_eq!(store.resolve("standup").unwrap(), "standup body");
    }

    #[test]
    fn test_locate_reports_source() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("retro.md"), "retro").unwrap();
        let mut config = TouchlogConfig::default();
        config
            .inline_templates
            .insert("quick".to_string(), "q".to_string());
        let store = TemplateStore::new(&config, Some(dir.path().to_path_buf()));

        assert_eq!(store.locate("quick"), Some(TemplateSource::Inline));
        assert_eq!(
            store.locate("retro"),
            Some(TemplateSource::File(dir.path().join("retro.md")))
        );
        assert_eq!(store.locate("meeting"), Some(TemplateSource::Builtin));
        assert_eq!(store.locate("nope"), None);
    }

    #[test]
    fn test_loose_file_in_templates_dir() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("retro.md"), "retro").unwrap();
        let config = TouchlogConfig::default();
        let store = TemplateStore::new(&config, Some(dir.path().to_path_buf()));
        assert_eq!(store.resolve("retro").unwrap(), "retro");
    }

    #[test]
    fn test_builtin_and_missing() {
        let config = TouchlogConfig::default();
        let store = TemplateStore::new(&config, None);
        assert!(store.resolve("journal").unwrap().contains("{{title}}"));
        let err = store.resolve("nope").unwrap_err();
        assert!(matches!(err, TouchlogError::TemplateNotFound(ref n) if n == "nope"));
    }

    #[test]
    fn test_effective_name_chain() {
        let mut config = TouchlogConfig::default();
        {
            let store = TemplateStore::new(&config, None);
            assert_eq!(store.effective_name(""), FALLBACK_TEMPLATE);
            assert_eq!(store.effective_name("meeting"), "meeting");
        }
        config.default_template = Some("journal".to_string());
        let store = TemplateStore::new(&config, None);
        assert_eq!(store.effective_name("  "), "journal");
    }

    #[test]
    fn test_available_dedupes_in_order() {
        let mut config = TouchlogConfig::starter();
        config
            .inline_templates
            .insert("scratch".to_string(), "s".to_string());
        let store = TemplateStore::new(&config, None);
        assert_eq!(
            store.available(),
            vec!["scratch", "daily", "meeting", "journal"]
        );
    }
}
