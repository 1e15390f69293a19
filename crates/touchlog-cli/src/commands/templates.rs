//! The `templates` command: list template names, or print one body.

use touchlog_core::template::{referenced_variables, TemplateSource};
use touchlog_core::TemplateStore;

use crate::app::AppContext;
use crate::cli::TemplatesArgs;
use crate::ui::{divider, header, print, table};

pub fn handle_templates(ctx: &AppContext, args: &TemplatesArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let config = ctx.load_config()?;
    let store = TemplateStore::new(&config, Some(ctx.templates_dir()));

    if let Some(name) = &args.name {
        let body = store.resolve(name)?;
        if ui.mode.is_pretty() && !ui.quiet {
            println!("{}", header(ui, &format!("templates {}", name)));
            println!("{}", divider(ui));
        }
        print!("{}", body);
        if !body.ends_with('\n') {
            println!();
        }
        return Ok(());
    }

    let default = store.effective_name("").to_string();
    let rows: Vec<Vec<String>> = store
        .available()
        .into_iter()
        .map(|name| {
            let source = store.locate(&name);
            let location = match &source {
                Some(TemplateSource::File(path)) => path.display().to_string(),
                _ => String::new(),
            };
            let marker = if name == default { "*" } else { "" };
            let variables = store
                .resolve(&name)
                .map(|body| variable_list(&body))
                .unwrap_or_default();
            vec![
                name,
                source.map(|s| s.label()).unwrap_or("missing").to_string(),
                marker.to_string(),
                variables,
                location,
            ]
        })
        .collect();

    if ui.mode.is_pretty() && !ui.quiet {
        println!("{}", header(ui, "templates"));
    }
    print(ui, &table(ui, &["Name", "Source", "Default", "Variables", "Path"], &rows));
    Ok(())
}

/// Distinct `{{name}}` variables of a template body, first use first.
fn variable_list(body: &str) -> String {
    let mut names: Vec<String> = Vec::new();
    for name in referenced_variables(body) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names.join(", ")
}
