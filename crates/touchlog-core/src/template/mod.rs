//! Template rendering with injection-safe escaping of user values.
//!
//! - **render**: `{{name}}` substitution over a [`RenderContext`]
//! - **escape**: placeholder tokens protecting braces in untrusted values
//! - **variables**: date/time, custom, metadata, and entry-field variables
//! - **store**: template lookup (inline, file, built-in)

mod escape;
mod render;
mod store;
mod variables;

pub use escape::Placeholders;
pub use render::{referenced_variables, render, RenderContext};
pub use store::{TemplateSource, TemplateStore, BUILTIN_TEMPLATES, FALLBACK_TEMPLATE};
pub use variables::{build_context, date_time_variables, join_tags, EntryFields};
