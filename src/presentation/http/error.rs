use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::use_cases::create_schema::CreateSchemaError;
use crate::application::use_cases::delete_chat::DeleteChatError;
use crate::application::use_cases::delete_schema::DeleteSchemaError;
use crate::application::use_cases::extract_pdf::ExtractPdfError;
use crate::application::use_cases::list_schemas::ListSchemasError;
use crate::application::use_cases::submit_turn::SubmitTurnError;
use crate::application::use_cases::update_schema::UpdateSchemaError;

/// Error surface of the HTTP layer. Every use-case error maps onto one of
/// these before a response starts streaming; failures after streaming starts
/// never come through here.
#[derive(Debug)]
pub enum AppError {
    Unauthorized,
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while processing your request".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<SubmitTurnError> for AppError {
    fn from(error: SubmitTurnError) -> Self {
        match error {
            SubmitTurnError::Unauthorized => AppError::Unauthorized,
            SubmitTurnError::BadRequest(msg) => AppError::BadRequest(msg),
            SubmitTurnError::NotFound(msg) => AppError::NotFound(msg),
            SubmitTurnError::StorageError(msg) => AppError::Internal(msg),
            SubmitTurnError::GenerationFailed(msg) => AppError::Internal(msg),
        }
    }
}

impl From<DeleteChatError> for AppError {
    fn from(error: DeleteChatError) -> Self {
        match error {
            DeleteChatError::Unauthorized => AppError::Unauthorized,
            DeleteChatError::NotFound(id) => AppError::NotFound(format!("Chat not found: {}", id)),
            DeleteChatError::StorageError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<CreateSchemaError> for AppError {
    fn from(error: CreateSchemaError) -> Self {
        match error {
            CreateSchemaError::ValidationError(msg) => AppError::BadRequest(msg),
            CreateSchemaError::StorageError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ListSchemasError> for AppError {
    fn from(error: ListSchemasError) -> Self {
        match error {
            ListSchemasError::StorageError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<UpdateSchemaError> for AppError {
    fn from(error: UpdateSchemaError) -> Self {
        match error {
            UpdateSchemaError::Unauthorized => AppError::Unauthorized,
            UpdateSchemaError::NotFound(id) => {
                AppError::NotFound(format!("Schema not found: {}", id))
            }
            UpdateSchemaError::ValidationError(msg) => AppError::BadRequest(msg),
            UpdateSchemaError::StorageError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<DeleteSchemaError> for AppError {
    fn from(error: DeleteSchemaError) -> Self {
        match error {
            DeleteSchemaError::Unauthorized => AppError::Unauthorized,
            DeleteSchemaError::NotFound(id) => {
                AppError::NotFound(format!("Schema not found: {}", id))
            }
            DeleteSchemaError::StorageError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ExtractPdfError> for AppError {
    fn from(error: ExtractPdfError) -> Self {
        match error {
            ExtractPdfError::NotAPdf(content_type) => {
                AppError::BadRequest(format!("File must be a PDF, got {}", content_type))
            }
            ExtractPdfError::ExtractionFailed(msg) => AppError::Internal(msg),
        }
    }
}
