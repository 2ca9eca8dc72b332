use std::sync::Arc;

use uuid::Uuid;

use crate::application::ports::auth::AuthResult;
use crate::domain::entities::{ColumnDef, DocText, UserSchema};
use crate::domain::repositories::SchemaRepository;

#[derive(Debug)]
pub enum CreateSchemaError {
    ValidationError(String),
    StorageError(String),
}

impl std::fmt::Display for CreateSchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateSchemaError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            CreateSchemaError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for CreateSchemaError {}

#[derive(Debug)]
pub struct CreateSchemaRequest {
    pub name: String,
    pub description: Option<String>,
    pub content: Vec<ColumnDef>,
    pub doc_text: Vec<DocText>,
}

pub struct CreateSchemaUseCase {
    schema_repository: Arc<dyn SchemaRepository>,
}

impl CreateSchemaUseCase {
    pub fn new(schema_repository: Arc<dyn SchemaRepository>) -> Self {
        Self { schema_repository }
    }

    pub async fn execute(
        &self,
        caller: &AuthResult,
        request: CreateSchemaRequest,
    ) -> Result<Uuid, CreateSchemaError> {
        if request.name.trim().is_empty() {
            return Err(CreateSchemaError::ValidationError(
                "Schema name is required".to_string(),
            ));
        }

        let schema = UserSchema::new(
            caller.caller_id,
            request.name,
            request.description,
            request.content,
            request.doc_text,
        );
        let id = schema.id();

        self.schema_repository
            .save(&schema)
            .await
            .map_err(|e| CreateSchemaError::StorageError(e.to_string()))?;

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::{MemorySchemaRepository, MemoryStore};

    fn caller() -> AuthResult {
        AuthResult {
            caller_id: Uuid::new_v4(),
            caller_email: "user@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let use_case = CreateSchemaUseCase::new(Arc::new(MemorySchemaRepository::new(store)));

        let result = use_case
            .execute(
                &caller(),
                CreateSchemaRequest {
                    name: "   ".to_string(),
                    description: None,
                    content: vec![],
                    doc_text: vec![],
                },
            )
            .await;

        assert!(matches!(result, Err(CreateSchemaError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_created_schema_belongs_to_caller() {
        let store = Arc::new(MemoryStore::new());
        let use_case =
            CreateSchemaUseCase::new(Arc::new(MemorySchemaRepository::new(store.clone())));
        let me = caller();

        let id = use_case
            .execute(
                &me,
                CreateSchemaRequest {
                    name: "users".to_string(),
                    description: Some("user table".to_string()),
                    content: vec![],
                    doc_text: vec![],
                },
            )
            .await
            .unwrap();

        let stored = store.schema(id).await.unwrap();
        assert_eq!(stored.user_id(), me.caller_id);
        assert_eq!(stored.name(), "users");
    }
}
