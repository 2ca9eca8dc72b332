use std::sync::Arc;

use crate::application::ports::document_extractor::DocumentExtractor;

#[derive(Debug)]
pub enum ExtractPdfError {
    NotAPdf(String),
    ExtractionFailed(String),
}

impl std::fmt::Display for ExtractPdfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractPdfError::NotAPdf(content_type) => {
                write!(f, "File must be a PDF, got {}", content_type)
            }
            ExtractPdfError::ExtractionFailed(msg) => {
                write!(f, "Failed to extract text from PDF: {}", msg)
            }
        }
    }
}

impl std::error::Error for ExtractPdfError {}

#[derive(Debug)]
pub struct ExtractPdfRequest {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug)]
pub struct ExtractPdfResponse {
    pub text: String,
    pub filename: String,
    pub size: usize,
}

/// The standalone extraction endpoint: one uploaded PDF in, its page text
/// out. Used by the schema editor to turn a document into doc text.
pub struct ExtractPdfUseCase {
    extractor: Arc<dyn DocumentExtractor>,
}

impl ExtractPdfUseCase {
    pub fn new(extractor: Arc<dyn DocumentExtractor>) -> Self {
        Self { extractor }
    }

    pub async fn execute(
        &self,
        request: ExtractPdfRequest,
    ) -> Result<ExtractPdfResponse, ExtractPdfError> {
        if !request.content_type.starts_with("application/pdf") {
            return Err(ExtractPdfError::NotAPdf(request.content_type));
        }

        let text = self
            .extractor
            .extract_pdf(&request.data)
            .await
            .map_err(|e| ExtractPdfError::ExtractionFailed(e.to_string()))?;

        let size = text.len();
        Ok(ExtractPdfResponse {
            text,
            filename: request.file_name,
            size,
        })
    }
}
