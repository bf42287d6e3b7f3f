//! Tokenization and candidate text extraction shared by the matchers.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use signifier_core::models::Candidate;

static WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b\w+\b").ok());

/// Text used when a candidate has no intent text at all.
pub const UNKNOWN_INTENT: &str = "unknown intent";

/// Word tokens longer than two characters, lowercased unless `case_sensitive`.
pub fn tokenize(text: &str, case_sensitive: bool) -> BTreeSet<String> {
    let Some(word) = WORD.as_ref() else {
        return BTreeSet::new();
    };
    word.find_iter(text)
        .map(|m| m.as_str())
        .filter(|t| t.chars().count() > 2)
        .map(|t| {
            if case_sensitive {
                t.to_string()
            } else {
                t.to_lowercase()
            }
        })
        .collect()
}

/// Every string leaf of a structured intent, in document order.
pub fn structured_strings(value: &Value) -> Vec<&str> {
    let mut out = Vec::new();
    collect_strings(value, &mut out);
    out
}

fn collect_strings<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => out.push(s),
        Value::Array(items) => items.iter().for_each(|v| collect_strings(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_strings(v, out)),
        _ => {}
    }
}

/// Lexical token set: intent text plus every structured-intent string.
pub fn candidate_tokens(candidate: &Candidate, case_sensitive: bool) -> BTreeSet<String> {
    let mut tokens = tokenize(&candidate.intent.nl_text, case_sensitive);
    if let Some(structured) = &candidate.intent.structured {
        for s in structured_strings(structured) {
            tokens.extend(tokenize(s, case_sensitive));
        }
    }
    tokens
}

/// Text to embed: intent text plus the structured `intent` field.
pub fn embedding_text(candidate: &Candidate) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let nl = candidate.intent.nl_text.trim();
    if !nl.is_empty() {
        parts.push(nl);
    }
    if let Some(Value::String(intent)) = candidate
        .intent
        .structured
        .as_ref()
        .and_then(|s| s.get("intent"))
    {
        if !intent.trim().is_empty() {
            parts.push(intent.trim());
        }
    }
    if parts.is_empty() {
        UNKNOWN_INTENT.to_string()
    } else {
        parts.join(" ")
    }
}
