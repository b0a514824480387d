//! Team roster and the cosmetic "your local time" offsets.
//!
//! Offsets are fixed: no daylight saving, no timezone database. A label is
//! either a known abbreviation or an explicit `UTC±H[:MM]` / `GMT±H[:MM]`.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Abbreviation → minutes east of UTC.
const OFFSET_TABLE: &[(&str, i32)] = &[
    ("UTC", 0),
    ("GMT", 0),
    ("BST", 60),
    ("CET", 60),
    ("CEST", 120),
    ("EST", -5 * 60),
    ("EDT", -4 * 60),
    ("CST", -6 * 60),
    ("CDT", -5 * 60),
    ("MST", -7 * 60),
    ("MDT", -6 * 60),
    ("PST", -8 * 60),
    ("PDT", -7 * 60),
    ("PKT", 5 * 60),
    ("IST", 5 * 60 + 30),
    ("SGT", 8 * 60),
    ("JST", 9 * 60),
    ("AEST", 10 * 60),
];

/// A summary recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    pub email: String,
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

fn default_utc_offset() -> String {
    "UTC".to_string()
}

impl TeamMember {
    pub fn new(name: &str, email: &str, utc_offset: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            utc_offset: utc_offset.to_string(),
        }
    }

    /// Fixed offset for this member; unknown labels fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        parse_offset(&self.utc_offset).unwrap_or_else(|| {
            log::warn!(
                "Unknown UTC offset '{}' for {}; using UTC",
                self.utc_offset,
                self.email
            );
            Utc.fix()
        })
    }

    /// `now` shifted into this member's offset.
    pub fn local_time(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset())
    }
}

/// Resolve an offset label, `None` if it is not recognised.
pub fn parse_offset(label: &str) -> Option<FixedOffset> {
    let label = label.trim().to_ascii_uppercase();

    if let Some(&(_, minutes)) = OFFSET_TABLE.iter().find(|(abbr, _)| *abbr == label) {
        return FixedOffset::east_opt(minutes * 60);
    }

    let rest = label
        .strip_prefix("UTC")
        .or_else(|| label.strip_prefix("GMT"))?;
    let mut chars = rest.chars();
    let sign = match chars.next()? {
        '+' => 1,
        '-' | '−' => -1,
        _ => return None,
    };
    let rest = chars.as_str();

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
        None => (rest.parse::<i32>().ok()?, 0),
    };
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_parse_abbreviations() {
        assert_eq!(parse_offset("PST").unwrap().local_minus_utc(), -8 * 3600);
        assert_eq!(parse_offset("ist").unwrap().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(parse_offset(" utc ").unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn test_parse_explicit_offsets() {
        assert_eq!(parse_offset("UTC+5").unwrap().local_minus_utc(), 5 * 3600);
        assert_eq!(parse_offset("UTC-3").unwrap().local_minus_utc(), -3 * 3600);
        assert_eq!(parse_offset("GMT+5:30").unwrap().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(parse_offset("UTC-09:30").unwrap().local_minus_utc(), -(9 * 3600 + 1800));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_offset("America/New_York").is_none());
        assert!(parse_offset("UTC+").is_none());
        assert!(parse_offset("UTC+25").is_none());
        assert!(parse_offset("UTC+5:75").is_none());
        assert!(parse_offset("").is_none());
    }

    #[test]
    fn test_local_time_applies_offset() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 14, 0, 0).unwrap();
        let member = TeamMember::new("Gus", "gus@example.com", "UTC-5");
        let local = member.local_time(now);
        assert_eq!(local.hour(), 9);
        assert_eq!(local.with_timezone(&Utc), now);
    }

    #[test]
    fn test_unknown_label_falls_back_to_utc() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 14, 0, 0).unwrap();
        let member = TeamMember::new("Sam", "sam@example.com", "Mars/Olympus");
        assert_eq!(member.offset().local_minus_utc(), 0);
        assert_eq!(member.local_time(now).hour(), 14);
    }

    #[test]
    fn test_member_deserialize_defaults_offset() {
        let member: TeamMember =
            serde_json::from_str(r#"{"name":"Brook","email":"brook@example.com"}"#).unwrap();
        assert_eq!(member.utc_offset, "UTC");
    }
}
