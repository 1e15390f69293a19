//! Brace escaping for untrusted template values.
//!
//! Every `{` and `}` in a user-supplied value is swapped for an opaque
//! placeholder before substitution, then the whole rendered document is
//! unescaped exactly once. Escaping single braces (rather than only `{{`
//! and `}}`) also covers a value ending in `{` that would otherwise join
//! with a `{` from the template to form a new token.

const OPEN_STEM: &str = "\u{E000}touchlog-open";
const CLOSE_STEM: &str = "\u{E000}touchlog-close";
const TERMINATOR: char = '\u{E001}';

/// Pair of placeholder tokens guaranteed absent from a given set of inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    open: String,
    close: String,
}

impl Placeholders {
    /// Pick the shortest placeholder pair that does not occur in any haystack.
    ///
    /// Starts from the base tokens and escalates to numbered variants on
    /// collision.
    pub fn choose<'a, I>(haystacks: I) -> Self
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        let mut level = 0usize;
        loop {
            let candidate = Self::at_level(level);
            let collides = haystacks
                .clone()
                .into_iter()
                .any(|text| text.contains(&candidate.open) || text.contains(&candidate.close));
            if !collides {
                return candidate;
            }
            level += 1;
        }
    }

    fn at_level(level: usize) -> Self {
        if level == 0 {
            Self {
                open: format!("{}{}", OPEN_STEM, TERMINATOR),
                close: format!("{}{}", CLOSE_STEM, TERMINATOR),
            }
        } else {
            Self {
                open: format!("{}-{}{}", OPEN_STEM, level, TERMINATOR),
                close: format!("{}-{}{}", CLOSE_STEM, level, TERMINATOR),
            }
        }
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    /// Replace braces in an untrusted value with placeholders.
    pub fn escape(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for ch in value.chars() {
            match ch {
                '{' => out.push_str(&self.open),
                '}' => out.push_str(&self.close),
                other => out.push(other),
            }
        }
        out
    }

    /// Restore literal braces. Call once, over the full rendered output.
    pub fn unescape(&self, rendered: &str) -> String {
        rendered.replace(&self.open, "{").replace(&self.close, "}")
    }
}
