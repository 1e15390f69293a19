//! Timezone resolution and timestamp formatting.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;

use crate::error::{Result, TouchlogError};

/// Timezone used to render dates: a named IANA zone or the system zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Named(Tz),
    Local,
}

impl Zone {
    /// Parse a configured timezone; empty or absent means the system zone.
    pub fn resolve(name: Option<&str>) -> Result<Self> {
        match name.map(str::trim).filter(|value| !value.is_empty()) {
            None => Ok(Zone::Local),
            Some(value) => value
                .parse::<Tz>()
                .map(Zone::Named)
                .map_err(|_| TouchlogError::InvalidTimezone(value.to_string())),
        }
    }

    /// Format `timestamp` in this zone. `pattern` must already be valid.
    pub fn format(&self, timestamp: DateTime<Utc>, pattern: &str) -> String {
        match self {
            Zone::Named(tz) => timestamp.with_timezone(tz).format(pattern).to_string(),
            Zone::Local => timestamp.with_timezone(&Local).format(pattern).to_string(),
        }
    }

    /// `YYYY-MM-DD` in this zone, used for filenames.
    pub fn date_stamp(&self, timestamp: DateTime<Utc>) -> String {
        self.format(timestamp, "%Y-%m-%d")
    }
}

/// Whether a strftime pattern is non-empty and free of unknown specifiers.
pub fn is_valid_format(pattern: &str) -> bool {
    !pattern.is_empty() && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// The pattern itself when valid, otherwise `fallback`.
pub fn format_or_default<'a>(pattern: Option<&'a str>, fallback: &'a str) -> &'a str {
    match pattern {
        Some(value) if is_valid_format(value) => value,
        Some(value) => {
            log::warn!(
                "invalid date/time format '{}', using '{}' instead",
                value,
                fallback
            );
            fallback
        }
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_resolve_named_zone() {
        let zone = Zone::resolve(Some("America/Denver")).unwrap();
        assert_eq!(zone, Zone::Named(chrono_tz::America::Denver));
    }

    #[test]
    fn test_resolve_empty_is_local() {
        assert_eq!(Zone::resolve(None).unwrap(), Zone::Local);
        assert_eq!(Zone::resolve(Some("  ")).unwrap(), Zone::Local);
    }

    #[test]
    fn test_resolve_invalid_zone() {
        let err = Zone::resolve(Some("Mars/Olympus")).unwrap_err();
        assert!(matches!(err, TouchlogError::InvalidTimezone(ref tz) if tz == "Mars/Olympus"));
    }

    #[test]
    fn test_date_stamp_respects_zone() {
        // 2024-01-15 03:00 UTC is still the 14th in Denver.
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 3, 0, 0).unwrap();
        let utc = Zone::Named(chrono_tz::UTC);
        let denver = Zone::Named(chrono_tz::America::Denver);
        assert_eq!(utc.date_stamp(ts), "2024-01-15");
        assert_eq!(denver.date_stamp(ts), "2024-01-14");
    }

    #[test]
    fn test_format_validation() {
        assert!(is_valid_format("%Y-%m-%d"));
        assert!(!is_valid_format(""));
        assert!(!is_valid_format("%Q"));
        assert_eq!(format_or_default(Some("%Q"), "%Y"), "%Y");
        assert_eq!(format_or_default(Some("%d/%m"), "%Y"), "%d/%m");
        assert_eq!(format_or_default(None, "%Y"), "%Y");
    }
}
