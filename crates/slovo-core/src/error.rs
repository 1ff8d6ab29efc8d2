/// Errors and conditions raised by the analysis pipeline
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The input contained no words to analyze
    #[error("No text to analyze")]
    EmptyInput,

    /// Statistics or export requested before any successful analysis
    #[error("No analysis results available")]
    NoData,

    #[error("Morphological backend is not initialized")]
    BackendNotReady,

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid word pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Conditions a shell should render as a message rather than a failure
    pub fn is_informational(&self) -> bool {
        matches!(self, AnalysisError::EmptyInput | AnalysisError::NoData)
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
