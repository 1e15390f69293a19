//! Slugs and final filenames for confirmed entries.

use std::path::{Path, PathBuf};

/// Longest slug kept in a filename, in bytes.
pub const MAX_SLUG_LENGTH: usize = 50;

/// Slug used when neither title nor message yields anything.
pub const DEFAULT_SLUG: &str = "untitled";

/// Highest numeric suffix tried before giving up on a free name.
pub const MAX_COLLISION_SUFFIX: u32 = 9999;

/// How an existing file at the base name is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilenamePolicy {
    /// Pick the first free name among `<base>.md`, `<base>_1.md`, ...
    #[default]
    AvoidCollision,
    /// Always use `<base>.md`, replacing whatever is there.
    Overwrite,
}

/// Filesystem-safe slug from the title, or the first line of the message.
pub fn slugify(title: &str, message: &str) -> String {
    let source = if title.is_empty() {
        message.lines().next().unwrap_or("").trim()
    } else {
        title
    };

    let mut slug = String::with_capacity(source.len());
    for ch in source.chars().flat_map(char::to_lowercase) {
        let ch = if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            ch
        } else {
            '-'
        };
        if ch == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(ch);
    }

    let mut slug = slug.trim_matches('-').to_string();
    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug
    }
}

/// `<date>_<slug>` without extension.
pub fn base_name(date_stamp: &str, title: &str, message: &str) -> String {
    format!("{}_{}", date_stamp, slugify(title, message))
}

/// Final path for `base` inside `dir` under `policy`.
///
/// Returns `None` only when every suffix up to [`MAX_COLLISION_SUFFIX`] is taken.
pub fn final_path(dir: &Path, base: &str, policy: FilenamePolicy) -> Option<PathBuf> {
    match policy {
        FilenamePolicy::Overwrite => Some(dir.join(format!("{}.md", base))),
        FilenamePolicy::AvoidCollision => find_available(dir, base),
    }
}

/// First name among `<base>.md`, `<base>_1.md`, ... that does not exist yet.
pub fn find_available(dir: &Path, base: &str) -> Option<PathBuf> {
    let candidate = dir.join(format!("{}.md", base));
    if !candidate.exists() {
        return Some(candidate);
    }
    (1..=MAX_COLLISION_SUFFIX)
        .map(|n| dir.join(format!("{}_{}.md", base, n)))
        .find(|candidate| !candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_slug_from_title() {
        assert_eq!(slugify("Team Sync", ""), "team-sync");
        assert_eq!(slugify("Q3: Goals & Plans!", ""), "q3-goals-plans");
        assert_eq!(slugify("--already--dashed--", ""), "already-dashed");
    }

    #[test]
    fn test_slug_falls_back_to_first_message_line() {
        assert_eq!(slugify("", "  Discussed Q3 goals \nsecond line"), "discussed-q3-goals");
    }

    #[test]
    fn test_slug_untitled() {
        assert_eq!(slugify("", ""), DEFAULT_SLUG);
        assert_eq!(slugify("!!!", ""), DEFAULT_SLUG);
        assert_eq!(slugify("", "\nlater line"), DEFAULT_SLUG);
    }

    #[test]
    fn test_slug_non_ascii_becomes_dash() {
        assert_eq!(slugify("Café Notes", ""), "caf-notes");
    }

    #[test]
    fn test_slug_truncates_and_trims() {
        let title = format!("{} {}", "a".repeat(49), "bcd");
        let slug = slugify(&title, "");
        assert_eq!(slug, "a".repeat(49));
        assert!(slugify(&"x".repeat(80), "").len() == MAX_SLUG_LENGTH);
    }

    #[test]
    fn test_collision_suffixes_increase() {
        let dir = tempdir().unwrap();
        let base = base_name("2024-01-15", "Team Sync", "");
        assert_eq!(base, "2024-01-15_team-sync");

        let first = final_path(dir.path(), &base, FilenamePolicy::AvoidCollision).unwrap();
        assert_eq!(first, dir.path().join("2024-01-15_team-sync.md"));
        fs::write(&first, "one").unwrap();

        let second = final_path(dir.path(), &base, FilenamePolicy::AvoidCollision).unwrap();
        assert_eq!(second, dir.path().join("2024-01-15_team-sync_1.md"));
        fs::write(&second, "two").unwrap();

        let third = final_path(dir.path(), &base, FilenamePolicy::AvoidCollision).unwrap();
        assert_eq!(third, dir.path().join("2024-01-15_team-sync_2.md"));
    }

    #[test]
    fn test_overwrite_ignores_numbered_variants() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2024-01-15_x.md"), "a").unwrap();
        fs::write(dir.path().join("2024-01-15_x_1.md"), "b").unwrap();
        let path = final_path(dir.path(), "2024-01-15_x", FilenamePolicy::Overwrite).unwrap();
        assert_eq!(path, dir.path().join("2024-01-15_x.md"));
    }

    #[test]
    fn test_gap_in_suffixes_is_reused() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("d_x.md"), "").unwrap();
        fs::write(dir.path().join("d_x_2.md"), "").unwrap();
        assert_eq!(
            find_available(dir.path(), "d_x").unwrap(),
            dir.path().join("d_x_1.md")
        );
    }
}
