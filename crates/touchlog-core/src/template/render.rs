//! `{{name}}` substitution.

use std::collections::BTreeMap;

use super::escape::Placeholders;

/// Variables for one render, split by whether they came from the user.
///
/// Trusted values (date/time, metadata) are substituted as-is. Untrusted
/// values (title, message, tags, custom variables) are escaped first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    trusted: BTreeMap<String, String>,
    untrusted: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a system-generated value. Replaces any earlier value of the same name.
    pub fn trusted(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.untrusted.remove(&name);
        self.trusted.insert(name, value.into());
        self
    }

    /// Insert a user-supplied value. Replaces any earlier value of the same name.
    pub fn untrusted(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.trusted.remove(&name);
        self.untrusted.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.trusted
            .get(name)
            .or_else(|| self.untrusted.get(name))
            .map(String::as_str)
    }

    pub fn is_trusted(&self, name: &str) -> bool {
        self.trusted.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.trusted.len() + self.untrusted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Render `template` against `ctx`.
///
/// Each declared variable is replaced by literal search/replace of
/// `{{name}}`; there is no nesting, conditionals, or loops. Tokens naming
/// undeclared variables are left in the output verbatim.
pub fn render(template: &str, ctx: &RenderContext) -> String {
    let haystacks: Vec<&str> = std::iter::once(template)
        .chain(ctx.trusted.values().map(String::as_str))
        .chain(ctx.untrusted.values().map(String::as_str))
        .collect();
    let placeholders = Placeholders::choose(haystacks.iter().copied());

    let mut values: BTreeMap<&str, String> = BTreeMap::new();
    for (name, value) in &ctx.trusted {
        values.insert(name, value.clone());
    }
    for (name, value) in &ctx.untrusted {
        values.insert(name, placeholders.escape(value));
    }

    let mut result = template.to_string();
    for (name, value) in &values {
        let token = format!("{{{{{}}}}}", name);
        result = result.replace(&token, value);
    }

    placeholders.unescape(&result)
}

/// Names referenced as `{{name}}` in a template, in order of appearance.
pub fn referenced_variables(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                    names.push(name.to_string());
                    rest = &after[end + 2..];
                } else {
                    rest = after;
                }
            }
            None => break,
        }
    }
    names
}
