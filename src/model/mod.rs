pub mod analysis;
pub mod config;

pub use analysis::{AnalysisRecord, AnalyzeRequest, AnalyzeResponse, Language, SourceRef};
pub use config::Config;
