use async_trait::async_trait;

#[derive(Debug)]
pub enum ExtractionError {
    CorruptedDocument(String),
    EncryptedDocument(String),
    ExtractionFailed(String),
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::CorruptedDocument(msg) => write!(f, "Corrupted document: {}", msg),
            ExtractionError::EncryptedDocument(msg) => write!(f, "Encrypted document: {}", msg),
            ExtractionError::ExtractionFailed(msg) => write!(f, "Extraction failed: {}", msg),
        }
    }
}

impl std::error::Error for ExtractionError {}

#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Page-level text of a PDF, pages joined with a blank line.
    async fn extract_pdf(&self, data: &[u8]) -> Result<String, ExtractionError>;
    /// Verbatim decode of a `text/*` body.
    async fn extract_plain(&self, data: &[u8]) -> Result<String, ExtractionError>;
}
