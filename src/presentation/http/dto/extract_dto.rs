use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ExtractResponseDto {
    pub text: String,
    pub filename: String,
    pub size: usize,
}

impl From<crate::application::use_cases::extract_pdf::ExtractPdfResponse> for ExtractResponseDto {
    fn from(response: crate::application::use_cases::extract_pdf::ExtractPdfResponse) -> Self {
        Self {
            text: response.text,
            filename: response.filename,
            size: response.size,
        }
    }
}
