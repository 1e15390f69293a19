//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::theme::{styled, styles, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "Touchlog · command"
/// Plain mode: "touchlog command"
pub fn header(ctx: &UiContext, command: &str) -> String {
    if ctx.mode.is_pretty() {
        let title = styled("Touchlog", styles::bold(), ctx.color);
        format!("{} \u{00B7} {}", title, command)
    } else {
        format!("touchlog {}", command)
    }
}

/// Render a divider line.
pub fn divider(ctx: &UiContext) -> String {
    if ctx.mode.is_pretty() {
        "\u{2500}".repeat(60)
    } else {
        "---".to_string()
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let badge_text = kind.display(ctx.unicode);
    let colored_badge = styled(badge_text, kind.style(), ctx.color);

    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
///
/// Pretty mode: "Hint: text" with dim styling
/// Plain mode: "hint=text"
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("{} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a receipt (summary block after an action).
///
/// Pretty mode: Badge + indented key-value pairs
/// Plain mode: status=<status> + key=value lines
pub fn receipt(ctx: &UiContext, status: &str, title: &str, items: &[(&str, &str)]) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        lines.push(format!("status={}", status));
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }

    lines.join("\n")
}

/// Render a table.
///
/// Pretty mode: bordered table with headers
/// Plain mode: tab-separated values, no header
pub fn table(ctx: &UiContext, headers: &[&str], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = ComfyTable::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.to_vec());
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Print a message to stdout unless quiet.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.quiet {
        println!("{}", message);
    }
}

/// Print an empty line (only in pretty mode).
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() && !ctx.quiet {
        println!();
    }
}

/// Format an error message with optional hint.
///
/// Pretty mode: "[ERR] message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(format!("hint={}", h));
        }
    }

    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;

    fn plain_ctx() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            quiet: false,
            mode: OutputMode::Plain,
        }
    }

    fn pretty_ctx() -> UiContext {
        UiContext {
            is_tty: true,
            color: false,
            unicode: true,
            quiet: false,
            mode: OutputMode::Pretty,
        }
    }

    #[test]
    fn test_header_modes() {
        assert_eq!(header(&plain_ctx(), "new"), "touchlog new");
        assert_eq!(header(&pretty_ctx(), "new"), "Touchlog \u{00B7} new");
    }

    #[test]
    fn test_kv_plain() {
        assert_eq!(kv(&plain_ctx(), "Output Dir", "/tmp"), "output_dir=/tmp");
        assert_eq!(kv(&pretty_ctx(), "Path", "/tmp/a.md"), "Path: /tmp/a.md");
    }

    #[test]
    fn test_receipt_plain() {
        let out = receipt(&plain_ctx(), "saved", "Saved", &[("Path", "/n/a.md")]);
        assert_eq!(out, "status=saved\npath=/n/a.md");
    }

    #[test]
    fn test_receipt_pretty() {
        let out = receipt(&pretty_ctx(), "saved", "Saved", &[("Path", "/n/a.md")]);
        assert!(out.starts_with("[\u{2713}] Saved"));
        assert!(out.contains("  Path: /n/a.md"));
    }

    #[test]
    fn test_table_plain_is_tab_separated() {
        let rows = vec![
            vec!["daily".to_string(), "built-in".to_string()],
            vec!["retro".to_string(), "file".to_string()],
        ];
        assert_eq!(
            table(&plain_ctx(), &["Name", "Source"], &rows),
            "daily\tbuilt-in\nretro\tfile"
        );
    }

    #[test]
    fn test_table_pretty_has_headers() {
        let rows = vec![vec!["daily".to_string(), "built-in".to_string()]];
        let out = table(&pretty_ctx(), &["Name", "Source"], &rows);
        assert!(out.contains("Name"));
        assert!(out.contains("daily"));
    }

    #[test]
    fn test_error_message_plain_with_hint() {
        let out = error_message(&plain_ctx(), "template 'x' not found", Some("touchlog templates"));
        assert_eq!(out, "error=template 'x' not found\nhint=touchlog templates");
    }
}
