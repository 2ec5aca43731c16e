//! Error handling for the skill gap analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillGapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Rejected request input, raised at the request boundary before any analysis runs.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unexpected internal failure, e.g. a malformed taxonomy entry.
    #[error("Computation error: {0}")]
    Computation(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, SkillGapError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for SkillGapError {
    fn from(err: anyhow::Error) -> Self {
        SkillGapError::Computation(err.to_string())
    }
}

impl SkillGapError {
    /// True for errors caused by the caller's input rather than by the engine.
    pub fn is_validation(&self) -> bool {
        matches!(self, SkillGapError::Validation(_))
    }
}
