//! Offline, rule-based extraction.
//!
//! Scans the text left to right, classifying each token as a date, ordinal,
//! time, word or connective. An entry is an anchor with its times, which may
//! come before it ("9-5 Mon-Fri"); the next anchor word after a time starts a
//! new entry. "closed" starts a closure
//! entry whose unknown words become the reason.

use std::str::FromStr;
use std::sync::LazyLock;

use hours_model::{DayOfWeek, ProgramContext, RawEntry, RawFacts};
use regex::Regex;
use tracing::trace;

use crate::collaborator::Collaborator;
use crate::error::CollaboratorError;

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?x)
        (?P<date>
            \b\d{{4}}-\d{{1,2}}-\d{{1,2}}\b
          | \b\d{{1,2}}/\d{{1,2}}(?:/\d{{2,4}})?\b
          | \b(?:{MONTHS})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?\b(?:,?\s+\d{{4}}\b)?
        )
      | (?P<ordinal>\b\d{{1,2}}(?:st|nd|rd|th)\b)
      | (?P<time>
            \b\d{{1,4}}(?::\d{{2}}){{0,2}}(?:\s*(?:[ap]\.?\s?m\b\.?|[ap]\b))?
          | \bnoon\b
          | \bmidnight\b
        )
      | (?P<word>[a-z]+)
      | (?P<connective>[-/&+,;\n])
        "
    ))
    .expect("Invalid plaintext token regex")
});

/// Words that belong to an anchor besides weekday names.
const ANCHOR_WORDS: &[&str] = &[
    "weekday", "weekdays", "weekend", "weekends", "daily", "everyday", "every", "each", "day",
    "days", "of", "the", "month", "monthly", "last", "first", "second", "third", "fourth", "fifth",
    "except", "on",
];

/// Words dropped wherever they appear.
const FILLER: &[&str] = &["open", "opens", "hours", "from", "at", "is", "are", "we", "re", "am", "pm"];

/// Deterministic extractor needing no network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextExtractor;

impl PlaintextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Segment `text` into RawFacts entries.
    pub fn segment(&self, text: &str) -> RawFacts {
        let lowered = text.to_lowercase().replace(['\u{2013}', '\u{2014}'], "-");
        let mut segmenter = Segmenter::default();
        for captures in TOKEN.captures_iter(&lowered) {
            if let Some(m) = captures.name("date").or_else(|| captures.name("ordinal")) {
                segmenter.anchor(m.as_str());
            } else if let Some(m) = captures.name("time") {
                segmenter.time(m.as_str());
            } else if let Some(m) = captures.name("word") {
                segmenter.word(m.as_str());
            } else if let Some(m) = captures.name("connective") {
                segmenter.connective(m.as_str());
            }
        }
        let raw = RawFacts::new(segmenter.finish());
        trace!(entries = raw.entries.len(), "segmented plaintext hours");
        raw
    }
}

impl Collaborator for PlaintextExtractor {
    fn name(&self) -> &str {
        "plaintext"
    }

    fn extract(
        &self,
        text: &str,
        _context: &ProgramContext,
    ) -> Result<RawFacts, CollaboratorError> {
        Ok(self.segment(text))
    }
}

#[derive(Debug, Default)]
struct Draft {
    anchor: Vec<String>,
    times: Vec<String>,
    closed: bool,
    extra: Vec<String>,
    /// Times came first ("9-5 Mon-Fri"); the anchor that follows owns them.
    leading_times: bool,
}

impl Draft {
    fn is_blank(&self) -> bool {
        self.anchor.is_empty() && self.times.is_empty() && !self.closed
    }

    /// Anchor pieces may still be appended.
    fn anchor_open(&self) -> bool {
        self.times.is_empty() || (self.leading_times && !self.anchor.is_empty())
    }

    /// A trailing anchor has claimed the leading times.
    fn anchored_after_times(&self) -> bool {
        self.leading_times && !self.anchor.is_empty()
    }
}

#[derive(Debug, Default)]
struct Segmenter {
    entries: Vec<RawEntry>,
    current: Draft,
    /// The previous entry was a closure; a following bare date list joins it.
    after_closure: bool,
}

impl Segmenter {
    fn anchor(&mut self, piece: &str) {
        if !self.current.anchor_open() {
            if self.current.anchor.is_empty() && !self.current.closed {
                self.current.leading_times = true;
            } else {
                self.flush();
            }
        }
        self.current.anchor.push(piece.to_string());
    }

    fn time(&mut self, token: &str) {
        if self.current.anchored_after_times() {
            self.flush();
        }
        self.current.times.push(token.to_string());
    }

    fn word(&mut self, word: &str) {
        if FILLER.contains(&word) {
            return;
        }
        if word == "closed" || word == "close" || word == "closes" {
            if !self.current.is_blank() {
                self.flush();
            }
            self.current.closed = true;
            return;
        }
        if matches!(word, "to" | "through" | "thru" | "till" | "til" | "until" | "and") {
            if self.current.times.is_empty() || self.current.anchored_after_times() {
                self.current.anchor.push(word.to_string());
            }
            return;
        }
        if is_anchor_word(word) {
            self.anchor(word);
            return;
        }
        if self.current.closed && self.current.times.is_empty() {
            self.current.anchor.push(word.to_string());
        }
        self.current.extra.push(word.to_string());
    }

    fn connective(&mut self, symbol: &str) {
        match symbol {
            "," | ";" | "\n" => {
                let closure = self.current.closed && !self.current.anchor.is_empty();
                if closure || self.current.anchored_after_times() {
                    self.flush();
                }
            }
            _ => {
                if self.current.anchor_open() && !self.current.anchor.is_empty() {
                    self.current.anchor.push(symbol.to_string());
                }
            }
        }
    }

    fn flush(&mut self) {
        let draft = std::mem::take(&mut self.current);
        if draft.is_blank() {
            return;
        }
        let dates_only = !draft.anchor.is_empty() && draft.anchor.iter().all(|piece| is_date_piece(piece));
        let closed = draft.closed || (self.after_closure && draft.times.is_empty() && dates_only);
        let extra = (!draft.extra.is_empty()).then(|| draft.extra.join(" "));
        let (note, reason) = if closed { (None, extra) } else { (extra, None) };
        self.after_closure = closed;
        self.entries.push(RawEntry {
            anchor: draft.anchor.join(" "),
            times: draft.times,
            closed,
            note,
            reason,
        });
    }

    fn finish(mut self) -> Vec<RawEntry> {
        self.flush();
        self.entries
    }
}

/// Date tokens are the only anchor pieces with a separator or inner space.
fn is_date_piece(piece: &str) -> bool {
    piece.contains('/') || (piece.len() > 1 && piece.contains('-')) || piece.contains(' ')
}

fn is_anchor_word(word: &str) -> bool {
    ANCHOR_WORDS.contains(&word) || DayOfWeek::from_str(word).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> Vec<RawEntry> {
        PlaintextExtractor::new().segment(text).entries
    }

    #[test]
    fn weekday_range_then_dated_closure() {
        let entries = segment("Mon-Wed 9am-5pm, closed 12/25");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].anchor, "mon - wed");
        assert_eq!(entries[0].times, vec!["9am", "5pm"]);
        assert!(!entries[0].closed);
        assert_eq!(entries[1].anchor, "12/25");
        assert!(entries[1].closed);
    }

    #[test]
    fn ordinal_weekdays_split_into_entries() {
        let entries = segment("1st Friday 10-2, 3rd Friday 10-2");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].anchor, "1st friday");
        assert_eq!(entries[1].anchor, "3rd friday");
        assert_eq!(entries[1].times, vec!["10", "2"]);
    }

    #[test]
    fn times_without_anchor_stay_unanchored() {
        let entries = segment("9-5");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].anchor.is_empty());
        assert_eq!(entries[0].times, vec!["9", "5"]);
    }

    #[test]
    fn recurring_closure_between_openings() {
        let entries = segment("Mon-Fri 9-5, closed holidays, 3rd Sat 10-2");
        assert_eq!(entries.len(), 3);
        assert!(entries[1].closed);
        assert_eq!(entries[1].anchor, "holidays");
        assert_eq!(entries[1].reason.as_deref(), Some("holidays"));
        assert_eq!(entries[2].anchor, "3rd sat");
    }

    #[test]
    fn split_shift_and_note() {
        let entries = segment("Tues 9:00 a.m. - 12 p.m. and 1 to 4 pm by appointment");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].times, vec!["9:00 a.m.", "12 p.m.", "1", "4 pm"]);
        assert_eq!(entries[0].note.as_deref(), Some("by appointment"));
    }

    #[test]
    fn comma_separated_export_format() {
        let entries = segment("Mon-Fri,10:00:00 AM,4:00:00 PM");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].times, vec!["10:00:00 am", "4:00:00 pm"]);
    }

    #[test]
    fn leading_times_belong_to_the_next_anchor() {
        let entries = segment("9am-5pm Mon-Fri, 10-2 Sat");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].anchor, "mon - fri");
        assert_eq!(entries[0].times, vec!["9am", "5pm"]);
        assert_eq!(entries[1].anchor, "sat");
        assert_eq!(entries[1].times, vec!["10", "2"]);
    }

    #[test]
    fn single_letter_days_are_anchors() {
        let entries = segment("M-F 9-5");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].anchor, "m - f");
    }

    #[test]
    fn closure_date_list_stays_closed() {
        let entries = segment("closed 12/24, 12/25");
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.closed));
    }
}
