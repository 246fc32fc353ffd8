//! Schema validation for normalized model output
//!
//! Enforces that the four mandated top-level fields exist and coerces
//! recoverable shape violations instead of rejecting them. This is the one
//! place where object-shaped question entries are canonicalized into the
//! single-string form; downstream components only ever see strings.

use serde_json::{Map, Value};

use super::error::AnalysisError;
use super::prompts::LanguagePack;
use crate::model::{AnalysisRecord, SourceRef};

const REQUIRED_FIELDS: [&str; 4] = [
    "claim_summary",
    "critical_questions",
    "impact_summary",
    "sources",
];

/// Key aliases accepted for the question part of an object-shaped entry
const QUESTION_KEY_ALIASES: &[&str] = &[
    "Vraag", "vraag", "Question", "question", "Frage", "frage", "Pregunta", "pregunta",
];

/// Key aliases accepted for the answer part, including the `"| Antwoord"`
/// artifact the model produces when it copies the question format literally
const ANSWER_KEY_ALIASES: &[&str] = &[
    "Antwoord",
    "antwoord",
    "| Antwoord",
    "| antwoord",
    "Answer",
    "answer",
    "Antwort",
    "antwort",
    "Respuesta",
    "respuesta",
];

/// Validate a normalized JSON value into an `AnalysisRecord`.
///
/// A missing top-level field is the one hard failure surfaced to the caller:
/// it means the model ignored the schema entirely rather than just
/// formatting poorly.
pub fn validate(value: Value, pack: &LanguagePack) -> Result<AnalysisRecord, AnalysisError> {
    let obj = value
        .as_object()
        .ok_or(AnalysisError::MissingField(REQUIRED_FIELDS[0]))?;

    for field in REQUIRED_FIELDS {
        if !obj.contains_key(field) {
            return Err(AnalysisError::MissingField(field));
        }
    }

    let claim_summary = match &obj["claim_summary"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let critical_questions = match &obj["critical_questions"] {
        Value::Array(entries) if !entries.is_empty() => entries
            .iter()
            .map(|entry| canonicalize_question_entry(entry, pack))
            .collect(),
        _ => vec![pack.no_questions_placeholder.to_string()],
    };

    let impact_summary = match &obj["impact_summary"] {
        Value::Array(entries) if !entries.is_empty() => entries
            .iter()
            .map(|entry| match entry {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => vec![pack.no_impact_placeholder.to_string()],
    };

    let sources = match &obj["sources"] {
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| serde_json::from_value::<SourceRef>(entry.clone()).ok())
            .collect(),
        _ => Vec::new(),
    };

    Ok(AnalysisRecord {
        claim_summary,
        critical_questions,
        impact_summary,
        sources,
    })
}

/// Canonicalize one critical_questions entry to the single-string form.
///
/// Strings pass through unchanged; object-shaped entries are flattened via
/// the key aliases; anything else becomes the fixed placeholder entry.
fn canonicalize_question_entry(entry: &Value, pack: &LanguagePack) -> String {
    match entry {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let question = lookup_alias(map, QUESTION_KEY_ALIASES).unwrap_or(pack.unknown_question);
            let answer = lookup_alias(map, ANSWER_KEY_ALIASES).unwrap_or(pack.no_answer);
            pack.format_question(question, answer)
        }
        _ => pack.format_question(pack.unknown_question, pack.no_answer),
    }
}

fn lookup_alias<'a>(map: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a str> {
    aliases.iter().find_map(|key| map.get(*key).and_then(Value::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Language;
    use crate::service::analysis::prompts::pack_for;
    use serde_json::json;

    fn nl() -> &'static LanguagePack {
        pack_for(Language::Nl)
    }

    #[test]
    fn test_well_formed_record_round_trips() {
        let value = json!({
            "claim_summary": "Samenvatting",
            "critical_questions": ["Vraag: Wat? | Antwoord: Dit."],
            "impact_summary": ["Impact 1", "Impact 2"],
            "sources": [{"title": "Bron", "url": "https://example.com"}]
        });

        let record = validate(value, nl()).unwrap();
        assert_eq!(record.claim_summary, "Samenvatting");
        assert_eq!(record.critical_questions, vec!["Vraag: Wat? | Antwoord: Dit."]);
        assert_eq!(record.impact_summary, vec!["Impact 1", "Impact 2"]);
        assert_eq!(
            record.sources,
            vec![SourceRef {
                title: "Bron".to_string(),
                url: "https://example.com".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_field_is_a_hard_failure() {
        let value = json!({
            "claim_summary": "S",
            "critical_questions": ["v"],
            "sources": []
        });

        let err = validate(value, nl()).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingField("impact_summary")));
    }

    #[test]
    fn test_non_object_root_is_a_hard_failure() {
        let err = validate(json!([1, 2, 3]), nl()).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingField(_)));
    }

    #[test]
    fn test_object_entry_canonicalized_to_string() {
        let value = json!({
            "claim_summary": "S",
            "critical_questions": [{"Vraag": "X", "Antwoord": "Y"}],
            "impact_summary": ["i"],
            "sources": []
        });

        let record = validate(value, nl()).unwrap();
        assert_eq!(record.critical_questions, vec!["Vraag: X | Antwoord: Y"]);
    }

    #[test]
    fn test_object_entry_with_lowercase_and_pipe_keys() {
        let value = json!({
            "claim_summary": "S",
            "critical_questions": [
                {"vraag": "A", "| Antwoord": "B"},
                {"Question": "C", "answer": "D"}
            ],
            "impact_summary": ["i"],
            "sources": []
        });

        let record = validate(value, nl()).unwrap();
        assert_eq!(
            record.critical_questions,
            vec!["Vraag: A | Antwoord: B", "Vraag: C | Antwoord: D"]
        );
    }

    #[test]
    fn test_object_entry_missing_subfields_gets_defaults() {
        let value = json!({
            "claim_summary": "S",
            "critical_questions": [{}],
            "impact_summary": ["i"],
            "sources": []
        });

        let record = validate(value, nl()).unwrap();
        assert_eq!(
            record.critical_questions,
            vec!["Vraag: Onbekende vraag | Antwoord: Geen antwoord"]
        );
    }

    #[test]
    fn test_unexpected_entry_type_becomes_placeholder() {
        let value = json!({
            "claim_summary": "S",
            "critical_questions": [42],
            "impact_summary": ["i"],
            "sources": []
        });

        let record = validate(value, nl()).unwrap();
        assert_eq!(
            record.critical_questions,
            vec!["Vraag: Onbekende vraag | Antwoord: Geen antwoord"]
        );
    }

    #[test]
    fn test_empty_lists_get_placeholders() {
        let value = json!({
            "claim_summary": "S",
            "critical_questions": [],
            "impact_summary": [],
            "sources": "not a list"
        });

        let record = validate(value, nl()).unwrap();
        assert_eq!(record.critical_questions, vec![nl().no_questions_placeholder]);
        assert_eq!(record.impact_summary, vec![nl().no_impact_placeholder]);
        assert!(record.sources.is_empty());
    }

    #[test]
    fn test_malformed_source_entries_are_dropped() {
        let value = json!({
            "claim_summary": "S",
            "critical_questions": ["v"],
            "impact_summary": ["i"],
            "sources": [
                {"title": "Goed", "url": "https://example.com"},
                {"title": "Geen url"},
                "just a string"
            ]
        });

        let record = validate(value, nl()).unwrap();
        assert_eq!(record.sources.len(), 1);
        assert_eq!(record.sources[0].title, "Goed");
    }

    #[test]
    fn test_degraded_record_passes_validation() {
        let value = super::super::normalize::degraded_record(nl());
        let record = validate(value, nl()).unwrap();
        assert_eq!(record.claim_summary, nl().degraded_summary);
        assert_eq!(record.critical_questions, vec![nl().degraded_question]);
    }
}
