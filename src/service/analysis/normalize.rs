//! Repair pipeline for near-JSON model output
//!
//! The model is asked for strict JSON but routinely wraps it in markdown
//! fences, prose, smart quotes, trailing commas, or object-shaped question
//! entries. Repairs run as an ordered chain of pure text transforms, cheapest
//! first, each independently testable. When every strategy is exhausted a
//! fixed degraded record is returned instead of an error.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};

use super::prompts::LanguagePack;

static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[}\]])").expect("valid trailing-comma pattern"));

static QUESTION_OBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\s*"[Vv]raag":\s*"([^"]*)",?\s*"\|?\s*[Aa]ntwoord":\s*"([^"]*)"\s*\}"#)
        .expect("valid question-object pattern")
});

/// Parse raw model output into a JSON value, repairing common defects.
///
/// Never fails: when both the strict parse and the repair pass come up empty
/// the degraded fallback record is returned. The caller cannot recover the
/// model's actual content in that path.
pub fn normalize(raw: &str, pack: &LanguagePack) -> Value {
    let text = raw.trim();
    let text = strip_code_fences(text);
    let text = slice_to_braces(text.trim());
    let text = flatten_whitespace(text);
    let text = strip_trailing_commas(&text);

    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(first_err) => {
            tracing::debug!(error = %first_err, "Strict JSON parse failed, applying repair pass");

            let repaired = normalize_smart_quotes(&text);
            let repaired = rewrite_answer_keys(&repaired);
            let repaired = rewrite_question_objects(&repaired);

            match serde_json::from_str(&repaired) {
                Ok(value) => {
                    tracing::debug!("Model output parsed after repair pass");
                    value
                }
                Err(second_err) => {
                    tracing::warn!(
                        error = %second_err,
                        preview = %raw.chars().take(200).collect::<String>(),
                        "Model output unrecoverable, returning degraded record"
                    );
                    degraded_record(pack)
                }
            }
        }
    }
}

/// Fixed fallback record used when the model output cannot be parsed at all
pub fn degraded_record(pack: &LanguagePack) -> Value {
    json!({
        "claim_summary": pack.degraded_summary,
        "critical_questions": [pack.degraded_question],
        "impact_summary": [pack.degraded_impact],
        "sources": []
    })
}

/// Slice out the content of the first fenced code block, preferring a fence
/// tagged as JSON. Without a closing fence the input passes through unchanged.
pub(crate) fn strip_code_fences(text: &str) -> &str {
    if let Some(open) = text.find("```json") {
        let start = open + "```json".len();
        if let Some(end) = text[start..].find("```") {
            return &text[start..start + end];
        }
    } else if let Some(open) = text.find("```") {
        let start = open + 3;
        if let Some(end) = text[start..].find("```") {
            return &text[start..start + end];
        }
    }
    text
}

/// Slice to the span between the first `{` and the last `}`, discarding any
/// prose before or after the JSON object.
pub(crate) fn slice_to_braces(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end >= start => &text[start..=end],
        _ => text,
    }
}

/// Replace literal newlines and tabs with spaces. Models sometimes emit
/// unescaped newlines inside string values, which breaks strict parsing.
pub(crate) fn flatten_whitespace(text: &str) -> String {
    text.replace(['\n', '\r', '\t'], " ")
}

/// Remove commas that appear immediately before a closing `}` or `]`
pub(crate) fn strip_trailing_commas(text: &str) -> String {
    TRAILING_COMMA_RE.replace_all(text, "${1}").into_owned()
}

/// Replace curly quotation marks and apostrophes with their ASCII equivalents
pub(crate) fn normalize_smart_quotes(text: &str) -> String {
    text.replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}

/// Rewrite keys literally named `"| Antwoord"` (a model artifact of the
/// question format) to plain `"antwoord"`
pub(crate) fn rewrite_answer_keys(text: &str) -> String {
    text.replace("\"| Antwoord\":", "\"antwoord\":")
        .replace("\"| antwoord\":", "\"antwoord\":")
}

/// Rewrite `{"Vraag": "...", "Antwoord": "..."}` objects embedded in the
/// critical_questions array into the canonical single-string form
pub(crate) fn rewrite_question_objects(text: &str) -> String {
    QUESTION_OBJECT_RE
        .replace_all(text, "\"Vraag: ${1} | Antwoord: ${2}\"")
        .into_owned()
}
