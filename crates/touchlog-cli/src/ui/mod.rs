//! UI primitives for the touchlog CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, color, quiet)
//! - **Mode**: Output mode resolution (plain, pretty)
//! - **Theme**: Badge tokens and styles
//! - **Render**: Headers, receipts, tables, hints, errors
//! - **Prompt**: Wizard step prompts

mod context;
mod mode;
pub mod prompt;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{
    badge, blank_line, divider, error_message, header, hint, kv, print, print_error, receipt,
    table,
};
