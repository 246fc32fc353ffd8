//! Knowledge-lookup enrichment for unanswered critical questions
//!
//! After validation every question entry is a single formatted string. Any
//! entry whose answer portion carries an unanswered marker gets one follow-up
//! knowledge lookup; a usable result replaces the answer, anything else keeps
//! the original entry. A failed lookup never aborts the request and never
//! affects the other entries. Output order always matches input order.

use super::prompts::{ANSWER_TAGS, LanguagePack, QUESTION_TAGS};
use crate::service::llm::ModelClient;

const LOOKUP_MAX_TOKENS: u32 = 1500;
const LOOKUP_TEMPERATURE: f32 = 0.2;

/// Lookup results at or below this length carry no real information
const MIN_USABLE_RESULT_CHARS: usize = 10;

/// Enrich unanswered question entries with knowledge lookups.
///
/// Same length and order as the input; entries without the separator
/// convention pass through byte-for-byte unchanged.
pub async fn enrich_questions(
    model: &dyn ModelClient,
    questions: Vec<String>,
    pack: &LanguagePack,
) -> Vec<String> {
    let mut enriched = Vec::with_capacity(questions.len());
    for entry in questions {
        enriched.push(enrich_entry(model, entry, pack).await);
    }
    enriched
}

async fn enrich_entry(model: &dyn ModelClient, entry: String, pack: &LanguagePack) -> String {
    // Entries without the "Tag: question | Tag: answer" convention have no
    // well-formed question to look up, marker phrases or not.
    let Some((question, answer)) = split_question_entry(&entry) else {
        return entry;
    };

    if !is_unanswered(&answer, pack) {
        return entry;
    }

    tracing::debug!(question = %question, "Question unanswered in article, issuing knowledge lookup");

    let result = knowledge_lookup(model, &question, pack).await;

    if is_usable_result(&result, pack) {
        tracing::debug!(
            question = %question,
            result_length = result.len(),
            "Merged lookup result into answer"
        );
        format!(
            "{}: {} | {}: {}: {}",
            pack.question_tag, question, pack.answer_tag, pack.online_info_prefix, result
        )
    } else {
        tracing::debug!(question = %question, "Lookup result unusable, keeping original entry");
        entry
    }
}

/// Issue a single knowledge lookup for a question.
///
/// Transport failures are absorbed into the unavailable sentinel so one bad
/// lookup cannot fail the whole request.
async fn knowledge_lookup(model: &dyn ModelClient, question: &str, pack: &LanguagePack) -> String {
    let prompt = pack.lookup_prompt(question);

    match model
        .generate(&prompt, LOOKUP_MAX_TOKENS, LOOKUP_TEMPERATURE)
        .await
    {
        Ok(text) => strip_filler_prefix(text.trim().to_string(), pack),
        Err(e) => {
            tracing::warn!(question = %question, error = %e, "Knowledge lookup failed");
            pack.lookup_unavailable.to_string()
        }
    }
}

/// Split a formatted entry into (question, answer), tolerating any supported
/// language's tags in either position. Returns `None` when the separator or
/// a recognizable question tag is missing.
fn split_question_entry(entry: &str) -> Option<(String, String)> {
    let (head, tail) = entry.split_once('|')?;
    let question = strip_tag(head.trim(), QUESTION_TAGS)?;
    let tail = tail.trim();
    let answer = strip_tag(tail, ANSWER_TAGS).unwrap_or_else(|| tail.to_string());
    Some((question, answer))
}

/// Strip a leading `"{Tag}:"` (case-insensitive) from a part, returning the
/// remainder, or `None` when no known tag is present.
fn strip_tag(part: &str, tags: &[&str]) -> Option<String> {
    for tag in tags {
        let Some(prefix) = part.get(..tag.len()) else {
            continue;
        };
        if prefix.eq_ignore_ascii_case(tag) {
            if let Some(rest) = part[tag.len()..].trim_start().strip_prefix(':') {
                return Some(rest.trim().to_string());
            }
        }
    }
    None
}

/// Answer portion contains one of the language's unanswered markers
fn is_unanswered(answer: &str, pack: &LanguagePack) -> bool {
    let lower = answer.to_lowercase();
    pack.unanswered_markers
        .iter()
        .any(|marker| lower.contains(marker))
}

/// A lookup result is usable when it is long enough to carry information and
/// contains neither lookup-failed sentinel
fn is_usable_result(result: &str, pack: &LanguagePack) -> bool {
    !result.is_empty()
        && result.chars().count() > MIN_USABLE_RESULT_CHARS
        && !pack
            .lookup_sentinels
            .iter()
            .any(|sentinel| result.contains(sentinel))
}

/// Drop a detected leading filler phrase along with its sentence
fn strip_filler_prefix(mut result: String, pack: &LanguagePack) -> String {
    for phrase in pack.filler_phrases {
        if result.starts_with(phrase) {
            if let Some(dot) = result.find('.') {
                result = result[dot + 1..].trim().to_string();
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Language;
    use crate::service::analysis::prompts::pack_for;
    use crate::service::llm::ModelError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubModel {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl StubModel {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelClient for StubModel {
        async fn generate(
            &self,
            _prompt: &str,
            _max_tokens: u32,
            _temperature: f32,
        ) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(ModelError::ApiError("service down".to_string())),
            }
        }
    }

    fn nl() -> &'static LanguagePack {
        pack_for(Language::Nl)
    }

    #[tokio::test]
    async fn test_unanswered_entry_gets_exactly_one_lookup() {
        let model = StubModel::replying("Het antwoord is 42.");
        let questions = vec!["Vraag: Wat? | Antwoord: Niet vermeld in artikel".to_string()];

        let enriched = enrich_questions(&model, questions, nl()).await;

        assert_eq!(model.call_count(), 1);
        assert_eq!(
            enriched,
            vec!["Vraag: Wat? | Antwoord: Online informatie: Het antwoord is 42."]
        );
    }

    #[tokio::test]
    async fn test_entry_without_separator_is_untouched() {
        let model = StubModel::replying("Het antwoord is 42.");
        let entry = "Geen informatie beschikbaar over dit onderwerp".to_string();

        let enriched = enrich_questions(&model, vec![entry.clone()], nl()).await;

        assert_eq!(model.call_count(), 0);
        assert_eq!(enriched, vec![entry]);
    }

    #[tokio::test]
    async fn test_answered_entry_is_untouched() {
        let model = StubModel::replying("Het antwoord is 42.");
        let entry = "Vraag: Wat? | Antwoord: Het staat in alinea twee.".to_string();

        let enriched = enrich_questions(&model, vec![entry.clone()], nl()).await;

        assert_eq!(model.call_count(), 0);
        assert_eq!(enriched, vec![entry]);
    }

    #[tokio::test]
    async fn test_sentinel_result_keeps_original_entry() {
        let model = StubModel::replying("Geen betrouwbare informatie gevonden over dit onderwerp");
        let entry = "Vraag: Wat? | Antwoord: Niet vermeld in artikel".to_string();

        let enriched = enrich_questions(&model, vec![entry.clone()], nl()).await;

        assert_eq!(model.call_count(), 1);
        assert_eq!(enriched, vec![entry]);
    }

    #[tokio::test]
    async fn test_short_result_keeps_original_entry() {
        let model = StubModel::replying("Ja.");
        let entry = "Vraag: Wat? | Antwoord: Niet vermeld in artikel".to_string();

        let enriched = enrich_questions(&model, vec![entry.clone()], nl()).await;

        assert_eq!(enriched, vec![entry]);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_absorbed() {
        let model = StubModel::failing();
        let entry = "Vraag: Wat? | Antwoord: Niet vermeld in artikel".to_string();

        let enriched = enrich_questions(&model, vec![entry.clone()], nl()).await;

        assert_eq!(model.call_count(), 1);
        assert_eq!(enriched, vec![entry]);
    }

    #[tokio::test]
    async fn test_order_preserved_across_mixed_entries() {
        let model = StubModel::replying("Uitgebreide achtergrond over het onderwerp.");
        let questions = vec![
            "Vraag: Een? | Antwoord: Staat in het artikel.".to_string(),
            "Vraag: Twee? | Antwoord: Niet vermeld in artikel".to_string(),
            "Los feitje zonder vraagteken".to_string(),
        ];

        let enriched = enrich_questions(&model, questions, nl()).await;

        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched[0], "Vraag: Een? | Antwoord: Staat in het artikel.");
        assert_eq!(
            enriched[1],
            "Vraag: Twee? | Antwoord: Online informatie: Uitgebreide achtergrond over het onderwerp."
        );
        assert_eq!(enriched[2], "Los feitje zonder vraagteken");
    }

    #[tokio::test]
    async fn test_english_tags_and_markers() {
        let model = StubModel::replying("A detailed factual answer about the topic.");
        let pack = pack_for(Language::En);
        let questions = vec!["Question: Why? | Answer: Not mentioned in article".to_string()];

        let enriched = enrich_questions(&model, questions, pack).await;

        assert_eq!(
            enriched,
            vec!["Question: Why? | Answer: Online information: A detailed factual answer about the topic."]
        );
    }

    #[test]
    fn test_split_tolerates_case_and_foreign_tags() {
        let (q, a) = split_question_entry("vraag: Wie? | antwoord: Niemand.").unwrap();
        assert_eq!(q, "Wie?");
        assert_eq!(a, "Niemand.");

        let (q, a) = split_question_entry("Frage: Warum? | Antwort: Darum.").unwrap();
        assert_eq!(q, "Warum?");
        assert_eq!(a, "Darum.");
    }

    #[test]
    fn test_split_rejects_untagged_head() {
        assert!(split_question_entry("Gewoon tekst | met een pijp").is_none());
        assert!(split_question_entry("Vraag zonder pijp").is_none());
    }

    #[test]
    fn test_filler_prefix_stripped_through_first_sentence() {
        let result = strip_filler_prefix(
            "Volgens mijn kennis is dit bekend. De maatregel geldt vanaf 2025.".to_string(),
            nl(),
        );
        assert_eq!(result, "De maatregel geldt vanaf 2025.");
    }

    #[test]
    fn test_non_filler_result_kept_intact() {
        let result = strip_filler_prefix("De maatregel geldt vanaf 2025.".to_string(), nl());
        assert_eq!(result, "De maatregel geldt vanaf 2025.");
    }
}
