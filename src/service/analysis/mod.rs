//! Article analysis pipeline
//!
//! Orchestrates the full flow: word-count gate, prompt construction, primary
//! model completion, output repair and validation, and knowledge-lookup
//! enrichment of unanswered questions.

use std::sync::Arc;

use chrono::Utc;

use crate::model::{AnalyzeRequest, AnalyzeResponse};
use crate::service::llm::ModelClient;

pub mod enrichment;
pub mod error;
pub mod normalize;
pub mod prompts;
pub mod validation;

pub use error::AnalysisError;

/// Minimum words required for a meaningful analysis
pub const MIN_WORD_COUNT: usize = 50;

/// Texts longer than this are truncated before prompting
pub const MAX_WORD_COUNT: usize = 5000;

const ANALYSIS_MAX_TOKENS: u32 = 1500;
const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// Service producing validated fact-check analyses of news articles
pub struct AnalysisService {
    model: Arc<dyn ModelClient>,
}

impl AnalysisService {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }

    /// Analyze an article and return the validated, enriched record.
    ///
    /// The only failures surfaced here are the word-count gate, a failed
    /// primary completion, and model output missing a mandated field; every
    /// cosmetic output defect is repaired silently.
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse, AnalysisError> {
        let words: Vec<&str> = request.text.split_whitespace().collect();
        let word_count = words.len();

        tracing::debug!(
            url = %request.url,
            title = %request.title,
            language = %request.language,
            word_count = word_count,
            "Received analysis request"
        );

        if word_count < MIN_WORD_COUNT {
            return Err(AnalysisError::TextTooShort {
                actual: word_count,
                minimum: MIN_WORD_COUNT,
            });
        }

        let (text, word_count) = if word_count > MAX_WORD_COUNT {
            tracing::debug!(
                original_word_count = word_count,
                "Truncating text to word limit"
            );
            (words[..MAX_WORD_COUNT].join(" "), MAX_WORD_COUNT)
        } else {
            (request.text.clone(), word_count)
        };

        let pack = prompts::pack_for(request.language);
        let prompt = prompts::build_analysis_prompt(&request.title, &text, pack);

        let start = std::time::Instant::now();
        let raw = self
            .model
            .generate(&prompt, ANALYSIS_MAX_TOKENS, ANALYSIS_TEMPERATURE)
            .await
            .map_err(|e| AnalysisError::ModelUnavailable(e.to_string()))?;

        tracing::debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            raw_length = raw.len(),
            preview = %raw.chars().take(200).collect::<String>(),
            "Primary analysis completion received"
        );

        let value = normalize::normalize(&raw, pack);
        let record = validation::validate(value, pack)?;

        let critical_questions =
            enrichment::enrich_questions(self.model.as_ref(), record.critical_questions, pack)
                .await;

        tracing::info!(
            url = %request.url,
            word_count = word_count,
            question_count = critical_questions.len(),
            source_count = record.sources.len(),
            "Analysis complete"
        );

        Ok(AnalyzeResponse {
            claim_summary: record.claim_summary,
            critical_questions,
            impact_summary: record.impact_summary,
            sources: record.sources,
            word_count,
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
