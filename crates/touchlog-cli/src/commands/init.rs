//! The `init` command: write a starter config and the built-in templates.

use std::path::Path;

use touchlog_core::template::BUILTIN_TEMPLATES;
use touchlog_core::TouchlogConfig;

use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::config::write_config;
use crate::ui::{hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let config_path = ctx.config_path();

    let config_status = if config_path.exists() && !args.force {
        log::info!("keeping existing config {}", config_path.display());
        "kept"
    } else {
        write_config(config_path, &TouchlogConfig::starter())?;
        log::info!("wrote config {}", config_path.display());
        "written"
    };

    let templates_dir = ctx.templates_dir();
    let written = write_builtin_templates(&templates_dir)?;

    let config_display = config_path.display().to_string();
    let templates_display = templates_dir.display().to_string();
    let written_display = if written.is_empty() {
        "none".to_string()
    } else {
        written.join(", ")
    };
    print(
        ui,
        &receipt(
            ui,
            "initialized",
            "Touchlog initialized",
            &[
                ("Config", config_display.as_str()),
                ("Config Status", config_status),
                ("Templates", templates_display.as_str()),
                ("Templates Written", written_display.as_str()),
            ],
        ),
    );
    if config_status == "kept" && ui.mode.is_pretty() {
        print(ui, &hint(ui, "Use --force to replace the existing config."));
    }
    Ok(())
}

/// Write each built-in template as `<name>.md`, leaving existing files alone.
/// Returns the names that were written.
fn write_builtin_templates(dir: &Path) -> anyhow::Result<Vec<String>> {
    std::fs::create_dir_all(dir).map_err(|e| {
        anyhow::anyhow!("Failed to create templates directory {}: {}", dir.display(), e)
    })?;

    let mut written = Vec::new();
    for (name, body) in BUILTIN_TEMPLATES {
        let path = dir.join(format!("{}.md", name));
        if path.exists() {
            log::debug!("template {} already exists", path.display());
            continue;
        }
        std::fs::write(&path, body)
            .map_err(|e| anyhow::anyhow!("Failed to write template {}: {}", path.display(), e))?;
        written.push(name.to_string());
    }
    Ok(written)
}
