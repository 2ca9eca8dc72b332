use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::application::ports::auth::AuthProvider;
use crate::application::use_cases::{
    CreateSchemaUseCase, DeleteSchemaUseCase, ListSchemasUseCase, UpdateSchemaUseCase,
    create_schema::CreateSchemaRequest, update_schema::UpdateSchemaRequest,
};
use crate::presentation::http::dto::{
    CreateSchemaDto, CreatedSchemaDto, DeleteSchemaQueryDto, SchemaResponseDto, UpdateSchemaDto,
};
use crate::presentation::http::error::AppError;
use crate::presentation::http::handlers::require_auth;

pub struct SchemaHandler {
    auth: Arc<dyn AuthProvider>,
    create_schema_use_case: Arc<CreateSchemaUseCase>,
    list_schemas_use_case: Arc<ListSchemasUseCase>,
    update_schema_use_case: Arc<UpdateSchemaUseCase>,
    delete_schema_use_case: Arc<DeleteSchemaUseCase>,
}

impl SchemaHandler {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        create_schema_use_case: Arc<CreateSchemaUseCase>,
        list_schemas_use_case: Arc<ListSchemasUseCase>,
        update_schema_use_case: Arc<UpdateSchemaUseCase>,
        delete_schema_use_case: Arc<DeleteSchemaUseCase>,
    ) -> Self {
        Self {
            auth,
            create_schema_use_case,
            list_schemas_use_case,
            update_schema_use_case,
            delete_schema_use_case,
        }
    }

    pub async fn create_schema(
        State(handler): State<Arc<SchemaHandler>>,
        headers: HeaderMap,
        Json(body): Json<CreateSchemaDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let caller = require_auth(handler.auth.as_ref(), &headers).await?;

        let id = handler
            .create_schema_use_case
            .execute(
                &caller,
                CreateSchemaRequest {
                    name: body.name,
                    description: body.description,
                    content: body.content,
                    doc_text: body.doc_text,
                },
            )
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(CreatedSchemaDto {
                id,
                message: "Schema created".to_string(),
            }),
        ))
    }

    pub async fn list_schemas(
        State(handler): State<Arc<SchemaHandler>>,
        headers: HeaderMap,
    ) -> Result<impl IntoResponse, AppError> {
        let caller = require_auth(handler.auth.as_ref(), &headers).await?;

        let schemas = handler.list_schemas_use_case.execute(&caller).await?;
        let response: Vec<SchemaResponseDto> =
            schemas.into_iter().map(SchemaResponseDto::from).collect();

        Ok(Json(response))
    }

    pub async fn update_schema(
        State(handler): State<Arc<SchemaHandler>>,
        headers: HeaderMap,
        Json(body): Json<UpdateSchemaDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let caller = require_auth(handler.auth.as_ref(), &headers).await?;

        handler
            .update_schema_use_case
            .execute(
                &caller,
                UpdateSchemaRequest {
                    id: body.id,
                    name: body.name,
                    description: body.description,
                    content: body.content,
                    doc_text: body.doc_text,
                },
            )
            .await?;

        Ok(Json(serde_json::json!({ "message": "Schema updated" })))
    }

    pub async fn delete_schema(
        State(handler): State<Arc<SchemaHandler>>,
        headers: HeaderMap,
        Query(query): Query<DeleteSchemaQueryDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let caller = require_auth(handler.auth.as_ref(), &headers).await?;

        handler
            .delete_schema_use_case
            .execute(&caller, query.id)
            .await?;

        Ok(Json(serde_json::json!({ "message": "Schema deleted" })))
    }
}
