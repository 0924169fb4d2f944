//! Versioned extraction payload.
//!
//! `RawFacts` is what the extraction collaborator hands back: anchor tokens
//! paired with time tokens, in the order they were found. Nothing about the
//! contents is guaranteed; the normalizer decides what is usable.

use serde::{Deserialize, Serialize};

/// The only payload version this build understands.
pub const RAW_FACTS_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFacts {
    pub version: u32,
    #[serde(default)]
    pub entries: Vec<RawEntry>,
}

/// One anchor with its time tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    /// Day, day range, ordinal weekday, day of month or date token. May be empty.
    #[serde(default)]
    pub anchor: String,
    /// Time tokens, consumed pairwise as open/close.
    #[serde(default)]
    pub times: Vec<String>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RawFacts {
    pub fn empty() -> Self {
        Self {
            version: RAW_FACTS_VERSION,
            entries: Vec::new(),
        }
    }

    pub fn new(entries: Vec<RawEntry>) -> Self {
        Self {
            version: RAW_FACTS_VERSION,
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RawEntry {
    pub fn open(anchor: impl Into<String>, times: &[&str]) -> Self {
        Self {
            anchor: anchor.into(),
            times: times.iter().map(|time| (*time).to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn closed(anchor: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            closed: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default() {
        let raw: RawFacts =
            serde_json::from_str(r#"{"version":1,"entries":[{"anchor":"Mon"}]}"#).unwrap();
        assert_eq!(raw.entries.len(), 1);
        assert!(raw.entries[0].times.is_empty());
        assert!(!raw.entries[0].closed);
    }

    #[test]
    fn builders_fill_fields() {
        let entry = RawEntry::closed("12/25").with_reason("Christmas");
        assert!(entry.closed);
        assert_eq!(entry.reason.as_deref(), Some("Christmas"));
        let open = RawEntry::open("Mon-Fri", &["9am", "5pm"]);
        assert_eq!(open.times, vec!["9am", "5pm"]);
    }
}
