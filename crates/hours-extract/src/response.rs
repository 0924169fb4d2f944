//! Completion text cleanup and RawFacts parsing.
//!
//! A completion is accepted in three shapes:
//!
//! - a RawFacts v1 object (`{"version": 1, "entries": [...]}`)
//! - a bare JSON array of entries, read as version 1
//! - line records, one entry per line or `;`: `anchor,time,time[,time,time...]`,
//!   with `closed` in the anchor (or as the only value) marking a closure

use hours_model::{RAW_FACTS_VERSION, RawEntry, RawFacts};
use serde_json::Value;

use crate::error::CollaboratorError;

/// Strip echoed prompt markers, the echoed input text and Markdown fences.
pub fn clean_completion(completion: &str, prompt_text: &str) -> String {
    let mut text = completion.trim().to_string();
    if let Some(start) = text.find("```") {
        let after = &text[start + 3..];
        let body_start = after.find('\n').map_or(0, |index| index + 1);
        let body = &after[body_start..];
        let end = body.find("```").unwrap_or(body.len());
        text = body[..end].to_string();
    }
    let answer = strip_echo(&text, prompt_text.trim()).trim_start();
    let answer = answer.strip_prefix("A:").unwrap_or(answer);
    answer.replace("%%", "").trim().to_string()
}

/// Drop a leading `Q: <prompt>` echo. A bare prompt prefix only counts as an
/// echo when an `A:` marker follows it, so an answer that repeats the input
/// verbatim survives.
fn strip_echo<'a>(text: &'a str, prompt_text: &str) -> &'a str {
    let text = text.trim_start();
    let (marked, rest) = match text.strip_prefix("Q:") {
        Some(rest) => (true, rest.trim_start()),
        None => (false, text),
    };
    if prompt_text.is_empty() {
        return rest;
    }
    match rest.strip_prefix(prompt_text) {
        Some(after) if marked || after.trim_start().starts_with("A:") => after,
        _ => rest,
    }
}

/// Parse cleaned completion text into RawFacts.
pub fn parse_completion(text: &str) -> Result<RawFacts, CollaboratorError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CollaboratorError::Unparseable("empty completion".to_string()));
    }
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return parse_json(trimmed);
    }
    parse_lines(trimmed)
}

fn parse_json(text: &str) -> Result<RawFacts, CollaboratorError> {
    let value: Value = serde_json::from_str(text)?;
    let raw = match value {
        Value::Array(_) => RawFacts::new(serde_json::from_value(value)?),
        Value::Object(_) => serde_json::from_value::<RawFacts>(value)?,
        other => {
            return Err(CollaboratorError::Unparseable(format!(
                "expected an object or array, got {other}"
            )));
        }
    };
    check_version(raw)
}

/// Reject payload versions this build does not understand.
pub fn check_version(raw: RawFacts) -> Result<RawFacts, CollaboratorError> {
    if raw.version == RAW_FACTS_VERSION {
        Ok(raw)
    } else {
        Err(CollaboratorError::Unparseable(format!(
            "unsupported RawFacts version {}",
            raw.version
        )))
    }
}

fn parse_lines(text: &str) -> Result<RawFacts, CollaboratorError> {
    let mut entries = Vec::new();
    for record in text.split(['\n', ';']).map(str::trim).filter(|r| !r.is_empty()) {
        let fields: Vec<&str> = record
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect();
        let Some((anchor, times)) = fields.split_first() else {
            continue;
        };
        let closed = anchor.to_ascii_lowercase().contains("closed")
            || times
                .first()
                .is_some_and(|value| value.eq_ignore_ascii_case("closed"));
        let times: Vec<String> = times
            .iter()
            .filter(|value| !value.eq_ignore_ascii_case("closed"))
            .map(|value| (*value).to_string())
            .collect();
        entries.push(RawEntry {
            anchor: (*anchor).to_string(),
            times,
            closed,
            ..RawEntry::default()
        });
    }
    if entries.is_empty() {
        return Err(CollaboratorError::Unparseable(format!(
            "no records in completion '{text}'"
        )));
    }
    Ok(RawFacts::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markers_echo_and_fences() {
        let cleaned = clean_completion(
            "Q: Mon 9-5\nA: ```json\n{\"version\":1,\"entries\":[]}\n```",
            "Mon 9-5",
        );
        assert_eq!(cleaned, "{\"version\":1,\"entries\":[]}");

        let cleaned = clean_completion(" A: Mon-Fri,9:00 AM,5:00 PM %%", "Mon-Fri 9-5");
        assert_eq!(cleaned, "Mon-Fri,9:00 AM,5:00 PM");

        let cleaned = clean_completion("Q: Mon 9-5\nA: Monday,9:00 AM,5:00 PM%%", "Mon 9-5");
        assert_eq!(cleaned, "Monday,9:00 AM,5:00 PM");

        let cleaned = clean_completion("Mon 9-5 A: Monday,9:00 AM,5:00 PM", "Mon 9-5");
        assert_eq!(cleaned, "Monday,9:00 AM,5:00 PM");
    }

    #[test]
    fn answer_repeating_the_input_is_kept() {
        let text = "Monday,9:00 AM,5:00 PM";
        let cleaned = clean_completion(text, text);
        assert_eq!(cleaned, text);
        let raw = parse_completion(&cleaned).unwrap();
        assert_eq!(raw.entries.len(), 1);
        assert_eq!(raw.entries[0].anchor, "Monday");
        assert_eq!(raw.entries[0].times, vec!["9:00 AM", "5:00 PM"]);

        let cleaned = clean_completion(&format!("{text}%%"), text);
        assert_eq!(cleaned, text);
    }

    #[test]
    fn parses_versioned_object_and_bare_array() {
        let raw = parse_completion(
            r#"{"version":1,"entries":[{"anchor":"Mon","times":["9am","5pm"]}]}"#,
        )
        .unwrap();
        assert_eq!(raw.entries[0].anchor, "Mon");

        let raw = parse_completion(r#"[{"anchor":"12/25","closed":true}]"#).unwrap();
        assert_eq!(raw.version, 1);
        assert!(raw.entries[0].closed);
    }

    #[test]
    fn rejects_unknown_version_and_garbage() {
        assert!(matches!(
            parse_completion(r#"{"version":2,"entries":[]}"#),
            Err(CollaboratorError::Unparseable(_))
        ));
        assert!(matches!(
            parse_completion("{not json"),
            Err(CollaboratorError::Unparseable(_))
        ));
        assert!(matches!(
            parse_completion("   "),
            Err(CollaboratorError::Unparseable(_))
        ));
    }

    #[test]
    fn parses_line_records() {
        let raw =
            parse_completion("Mon-Fri,10:00:00 AM,4:00:00 PM\nSat,9am,12pm,1pm,3pm; 12/25,closed")
                .unwrap();
        assert_eq!(raw.entries.len(), 3);
        assert_eq!(raw.entries[0].times, vec!["10:00:00 AM", "4:00:00 PM"]);
        assert_eq!(raw.entries[1].times.len(), 4);
        assert!(raw.entries[2].closed);
        assert!(raw.entries[2].times.is_empty());
    }
}
