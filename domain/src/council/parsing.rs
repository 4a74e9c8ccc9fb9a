//! Verdict parsing for judge responses.
//!
//! Extracts an approve/reject [`Vote`] from a free-form judge reply. Pure
//! domain logic: no I/O, just text pattern matching.
//!
//! # Supported Formats
//!
//! 1. **JSON** (preferred): `{"approved": true, "confidence": 0.8, "comment": "..."}`
//! 2. **Keywords**: APPROVE / REJECT anywhere in the text

use super::vote::Vote;

/// Confidence assigned when a reply contains neither keyword
const AMBIGUOUS_CONFIDENCE: f64 = 0.5;

const APPROVE_WORDS: &[&str] = &["APPROVE", "APPROVED", "APPROVES"];
const REJECT_WORDS: &[&str] = &[
    "REJECT",
    "REJECTED",
    "REJECTS",
    "DISAPPROVE",
    "DISAPPROVED",
    "DISAPPROVES",
    "UNAPPROVED",
];
/// Words that turn a following approval into a rejection
const NEGATIONS: &[&str] = &["NOT", "DON'T", "DONT", "CANNOT", "CAN'T", "WON'T", "NEVER"];

/// Parse a judge reply into a vote.
///
/// Conservative: an ambiguous reply counts as a rejection with reduced
/// confidence. The full reply becomes the comment unless the JSON form
/// supplies one. Keywords match whole words only.
///
/// # Examples
///
/// ```
/// use council_domain::council::parsing::parse_verdict;
///
/// let vote = parse_verdict("judge-1", r#"{"approved": true, "confidence": 0.8}"#);
/// assert!(vote.approved);
/// assert_eq!(vote.confidence, 0.8);
///
/// let vote = parse_verdict("judge-2", "I CANNOT APPROVE this migration.");
/// assert!(!vote.approved);
/// ```
pub fn parse_verdict(supervisor: &str, response: &str) -> Vote {
    if let Some(vote) = parse_json_verdict(supervisor, response) {
        return vote;
    }

    let upper = response.to_uppercase().replace('\u{2019}', "'");
    let words: Vec<&str> = upper
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty())
        .collect();

    let mut approved = false;
    let mut rejected = false;
    for (i, word) in words.iter().enumerate() {
        if REJECT_WORDS.contains(word) {
            rejected = true;
        } else if APPROVE_WORDS.contains(word) {
            if i > 0 && NEGATIONS.contains(&words[i - 1]) {
                rejected = true;
            } else {
                approved = true;
            }
        }
    }

    let confidence = if approved != rejected {
        1.0
    } else {
        AMBIGUOUS_CONFIDENCE
    };

    Vote::new(supervisor, approved && !rejected, response.trim()).with_confidence(confidence)
}

fn parse_json_verdict(supervisor: &str, response: &str) -> Option<Vote> {
    let start = response.find('{')?;
    let end = response[start..].rfind('}')?;
    let parsed: serde_json::Value = serde_json::from_str(&response[start..start + end + 1]).ok()?;

    let approved = parsed.get("approved").and_then(|v| v.as_bool())?;
    let confidence = parsed
        .get("confidence")
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let comment = parsed
        .get("comment")
        .or_else(|| parsed.get("reasoning"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| response.trim().to_string());

    Some(Vote::new(supervisor, approved, comment).with_confidence(confidence))
}
