//! Error types for article analysis

use thiserror::Error;

/// Error type for the analysis pipeline.
///
/// Cosmetic defects in the model output are repaired silently and never show
/// up here; these variants are the only failures surfaced to the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    /// Request text is below the analysis minimum
    #[error("Text too short for analysis: {actual} words (minimum {minimum} required)")]
    TextTooShort { actual: usize, minimum: usize },

    /// The primary analysis completion failed entirely
    #[error("Model request failed: {0}")]
    ModelUnavailable(String),

    /// The model output parsed but lacks a mandated top-level field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
