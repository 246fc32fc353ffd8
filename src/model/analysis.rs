//! Request and response types for article analysis

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Supported article languages.
///
/// Unrecognized codes fall back to Dutch rather than rejecting the request,
/// matching the prompt bundle fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Nl,
    En,
    De,
    Es,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Nl => "nl",
            Language::En => "en",
            Language::De => "de",
            Language::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nl" => Ok(Language::Nl),
            "en" => Ok(Language::En),
            "de" => Ok(Language::De),
            "es" => Ok(Language::Es),
            _ => Err(()),
        }
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Ok(code.parse().unwrap_or_default())
    }
}

/// Incoming analysis request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Source URL of the article
    pub url: String,
    /// Article title
    pub title: String,
    /// Full article text
    pub text: String,
    /// Article language (nl, en, de, es); defaults to Dutch
    #[serde(default)]
    pub language: Language,
}

/// A source reference suggested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
}

/// Validated analysis record produced from the model's output.
///
/// `critical_questions` entries are always single formatted strings of the
/// form `"Vraag: {q} | Antwoord: {a}"` (tags vary by language); structured
/// question/answer pairs never survive past validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisRecord {
    pub claim_summary: String,
    pub critical_questions: Vec<String>,
    pub impact_summary: Vec<String>,
    pub sources: Vec<SourceRef>,
}

/// Final analysis response returned to the client
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub claim_summary: String,
    pub critical_questions: Vec<String>,
    pub impact_summary: Vec<String>,
    pub sources: Vec<SourceRef>,
    pub word_count: usize,
    /// RFC 3339 timestamp of when the analysis completed
    pub timestamp: String,
}
