use std::path::{Path, PathBuf};

use touchlog_core::TouchlogConfig;

use crate::constants::{APP_DIR, CONFIG_ENV};
use crate::errors::CliError;

/// Config file location: `$TOUCHLOG_CONFIG`, else the XDG config dir.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Templates live next to the config file.
pub fn templates_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|dir| dir.join("templates"))
        .unwrap_or_else(|| PathBuf::from("templates"))
}

/// Load and validate a config file. A missing file yields defaults.
pub fn load_config(path: &Path) -> anyhow::Result<TouchlogConfig> {
    if !path.exists() {
        log::info!("no config at {}, using defaults", path.display());
        return Ok(TouchlogConfig::default());
    }
    let config = read_config(path)?;
    config
        .validate()
        .map_err(|e| CliError::invalid_input(format!("{} ({})", e, path.display())))?;
    Ok(config)
}

pub fn read_config(path: &Path) -> anyhow::Result<TouchlogConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents).map_err(|e| {
        CliError::invalid_input(format!("Failed to parse config {}: {}", path.display(), e))
            .into()
    })
}

pub fn write_config(path: &Path, config: &TouchlogConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join(APP_DIR));
        }
    }
    Ok(home_dir()?.join(".config").join(APP_DIR))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, TouchlogConfig::default());
    }

    #[test]
    fn test_round_trip_starter_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        write_config(&path, &TouchlogConfig::starter()).unwrap();
        assert_eq!(load_config(&path).unwrap(), TouchlogConfig::starter());
    }

    #[test]
    fn test_reads_full_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r##"
default_template = "meeting"
timezone = "Europe/Berlin"

[variables]
project = "apollo"

[inline_templates]
quick = "# {{title}}"

[datetime_vars.time]
enabled = false

[editor]
command = "hx"
args = ["--vsplit"]

[metadata]
include_git = true
"##,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.default_template(), Some("meeting"));
        assert_eq!(config.variables.get("project").map(String::as_str), Some("apollo"));
        assert!(!config.datetime_vars.time.is_enabled());
        assert_eq!(config.editor.unwrap().args, vec!["--vsplit"]);
        assert!(config.metadata.include_git);
        assert!(config.metadata.include_user);
    }

    #[test]
    fn test_reserved_variable_rejected_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[variables]\ndatetime = \"x\"\n").unwrap();
        let err = load_config(&path).unwrap_err();
        let cli = err.downcast_ref::<CliError>().unwrap();
        assert!(cli.message().contains("reserved"));
    }

    #[test]
    fn test_templates_dir_is_sibling() {
        assert_eq!(
            templates_dir(Path::new("/etc/touchlog/config.toml")),
            PathBuf::from("/etc/touchlog/templates")
        );
    }
}
