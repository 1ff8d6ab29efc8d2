use slovo_core::AnalysisError;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Nothing has been analyzed yet
    #[error("No analysis results to export")]
    NoData,

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Analysis error: {0}")]
    Analysis(AnalysisError),
}

impl From<AnalysisError> for ExportError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::NoData => ExportError::NoData,
            other => ExportError::Analysis(other),
        }
    }
}

impl ExportError {
    pub fn is_informational(&self) -> bool {
        matches!(self, ExportError::NoData)
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
