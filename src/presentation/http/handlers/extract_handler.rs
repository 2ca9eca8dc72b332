use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
    http::HeaderMap,
    response::IntoResponse,
};

use crate::application::ports::auth::AuthProvider;
use crate::application::use_cases::{ExtractPdfUseCase, extract_pdf::ExtractPdfRequest};
use crate::presentation::http::dto::ExtractResponseDto;
use crate::presentation::http::error::AppError;
use crate::presentation::http::handlers::require_auth;

pub struct ExtractHandler {
    auth: Arc<dyn AuthProvider>,
    extract_pdf_use_case: Arc<ExtractPdfUseCase>,
}

impl ExtractHandler {
    pub fn new(auth: Arc<dyn AuthProvider>, extract_pdf_use_case: Arc<ExtractPdfUseCase>) -> Self {
        Self {
            auth,
            extract_pdf_use_case,
        }
    }

    /// POST /api/pdf-extract: multipart upload with a single `file` field.
    pub async fn extract_pdf(
        State(handler): State<Arc<ExtractHandler>>,
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, AppError> {
        require_auth(handler.auth.as_ref(), &headers).await?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| AppError::BadRequest("Invalid multipart body".to_string()))?
        {
            let file_name = field
                .file_name()
                .ok_or_else(|| AppError::BadRequest("Missing file name".to_string()))?
                .to_string();

            let content_type = field
                .content_type()
                .map(|ct| ct.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());

            let data = field
                .bytes()
                .await
                .map_err(|_| AppError::BadRequest("Failed to read file data".to_string()))?
                .to_vec();

            let response = handler
                .extract_pdf_use_case
                .execute(ExtractPdfRequest {
                    file_name,
                    content_type,
                    data,
                })
                .await?;

            return Ok(Json(ExtractResponseDto::from(response)));
        }

        Err(AppError::BadRequest("No file uploaded".to_string()))
    }
}
