//! Building the render context for an entry.

use chrono::{DateTime, Utc};

use crate::config::{
    DateTimeVars, TouchlogConfig, DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT,
    DEFAULT_TIME_FORMAT,
};
use crate::metadata::Metadata;
use crate::zone::{format_or_default, Zone};

use super::render::RenderContext;

/// User-entered fields of an entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryFields<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub tags: &'a [String],
}

/// `date`, `time`, `datetime` for `timestamp` in `zone`, honouring enable
/// flags. When every variable is disabled all three are emitted with
/// default patterns.
pub fn date_time_variables(
    vars: &DateTimeVars,
    timestamp: DateTime<Utc>,
    zone: Zone,
) -> Vec<(&'static str, String)> {
    let specs = [
        ("date", &vars.date, DEFAULT_DATE_FORMAT),
        ("time", &vars.time, DEFAULT_TIME_FORMAT),
        ("datetime", &vars.datetime, DEFAULT_DATETIME_FORMAT),
    ];

    let mut out: Vec<(&'static str, String)> = specs
        .iter()
        .filter(|(_, var, _)| var.is_enabled())
        .map(|(name, var, fallback)| {
            let pattern = format_or_default(var.format.as_deref(), fallback);
            (*name, zone.format(timestamp, pattern))
        })
        .collect();

    if out.is_empty() {
        out = specs
            .iter()
            .map(|(name, _, fallback)| (*name, zone.format(timestamp, fallback)))
            .collect();
    }
    out
}

/// Tags as they appear in templates: `a, b, c`, or empty.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Merge time variables, custom variables, metadata, and entry fields.
///
/// Later sources win on name clashes: entry fields override custom
/// variables, which is why the order below matters.
pub fn build_context(
    config: &TouchlogConfig,
    timestamp: DateTime<Utc>,
    zone: Zone,
    metadata: Option<&Metadata>,
    fields: EntryFields<'_>,
) -> RenderContext {
    let mut ctx = RenderContext::new();

    for (name, value) in date_time_variables(&config.datetime_vars, timestamp, zone) {
        ctx.trusted(name, value);
    }
    for (name, value) in &config.variables {
        ctx.untrusted(name.clone(), value.clone());
    }
    if let Some(meta) = metadata {
        for (name, value) in meta.variables() {
            ctx.trusted(name, value);
        }
    }

    ctx.untrusted("title", fields.title);
    ctx.untrusted("message", fields.message);
    ctx.untrusted("tags", join_tags(fields.tags));
    ctx
}
