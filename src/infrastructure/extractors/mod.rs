pub mod pdf_extractor;
pub mod text_extractor;

use async_trait::async_trait;

use crate::application::ports::document_extractor::{DocumentExtractor, ExtractionError};

/// In-process extractor backing both extraction paths: lopdf for PDFs,
/// verbatim UTF-8 decode for text-family files.
pub struct LocalDocumentExtractor;

impl LocalDocumentExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalDocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for LocalDocumentExtractor {
    async fn extract_pdf(&self, data: &[u8]) -> Result<String, ExtractionError> {
        pdf_extractor::extract_pdf_text(data)
    }

    async fn extract_plain(&self, data: &[u8]) -> Result<String, ExtractionError> {
        Ok(text_extractor::decode_text(data))
    }
}
