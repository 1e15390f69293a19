//! Guided prompt primitives for the entry wizard.

use dialoguer::{theme::ColorfulTheme, Input, Select};

use super::context::UiContext;
use super::theme::{styled, styles};

/// Typed at any text step to return to the previous step.
pub const BACK_TOKEN: &str = "<";

/// Answer to a text step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepInput {
    Value(String),
    Back,
}

impl StepInput {
    /// Interpret raw text from a prompt.
    pub fn from_raw(raw: String) -> Self {
        if raw.trim() == BACK_TOKEN {
            StepInput::Back
        } else {
            StepInput::Value(raw)
        }
    }
}

fn require_tty(ctx: &UiContext) -> anyhow::Result<()> {
    if !ctx.is_interactive() {
        return Err(anyhow::anyhow!(
            "Interactive input required. Use --no-input with flags or run on a TTY."
        ));
    }
    Ok(())
}

/// Print the step title with its position, e.g. "2/5  Output directory".
pub fn print_step(ctx: &UiContext, position: usize, total: usize, title: &str) {
    if !ctx.mode.is_pretty() {
        return;
    }
    let progress = styled(&format!("{}/{}", position, total), styles::dim(), ctx.color);
    println!("{}  {}", progress, styled(title, styles::bold(), ctx.color));
}

/// Prompt for a possibly empty line of text.
pub fn prompt_text(ctx: &UiContext, prompt: &str, default: &str) -> anyhow::Result<StepInput> {
    require_tty(ctx)?;

    let theme = ColorfulTheme::default();
    let mut builder = Input::<String>::with_theme(&theme)
        .with_prompt(prompt)
        .allow_empty(true);
    if !default.is_empty() {
        builder = builder.default(default.to_string());
    }
    let raw = builder.interact_text()?;
    Ok(StepInput::from_raw(raw))
}

/// Prompt for a command string with no default.
pub fn prompt_command(ctx: &UiContext, prompt: &str) -> anyhow::Result<String> {
    require_tty(ctx)?;

    let theme = ColorfulTheme::default();
    let raw = Input::<String>::with_theme(&theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(raw)
}

/// Prompt for a selection. `None` when the user backs out with Esc or q.
pub fn prompt_select<T: AsRef<str>>(
    ctx: &UiContext,
    prompt: &str,
    options: &[T],
    default: usize,
) -> anyhow::Result<Option<usize>> {
    require_tty(ctx)?;

    let items: Vec<&str> = options.iter().map(AsRef::as_ref).collect();
    let theme = ColorfulTheme::default();
    let result = Select::with_theme(&theme)
        .with_prompt(prompt)
        .items(&items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact_opt()?;
    Ok(result)
}

/// Split a comma-separated tag list, dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
