//! Application context for the Touchlog CLI.
//!
//! Holds the resolved config path and UI context for command handlers.

use std::path::{Path, PathBuf};

use touchlog_core::TouchlogConfig;

use crate::cli::Cli;
use crate::config::{default_config_path, load_config, templates_dir};
use crate::ui::UiContext;

pub struct AppContext {
    ui: UiContext,
    config_path: PathBuf,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = match cli.config.as_deref() {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_config_path()?,
        };
        Ok(Self {
            ui: UiContext::from_env(cli.plain, cli.no_color, cli.quiet),
            config_path,
        })
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Directory holding template files, next to the config file.
    pub fn templates_dir(&self) -> PathBuf {
        templates_dir(&self.config_path)
    }

    /// Load and validate the config. A missing file yields defaults.
    pub fn load_config(&self) -> anyhow::Result<TouchlogConfig> {
        load_config(&self.config_path)
    }
}
