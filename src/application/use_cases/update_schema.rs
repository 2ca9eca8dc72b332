use std::sync::Arc;

use uuid::Uuid;

use crate::application::ports::auth::AuthResult;
use crate::domain::entities::{ColumnDef, DocText};
use crate::domain::repositories::SchemaRepository;

#[derive(Debug)]
pub enum UpdateSchemaError {
    Unauthorized,
    NotFound(Uuid),
    ValidationError(String),
    StorageError(String),
}

impl std::fmt::Display for UpdateSchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateSchemaError::Unauthorized => write!(f, "Unauthorized"),
            UpdateSchemaError::NotFound(id) => write!(f, "Schema not found: {}", id),
            UpdateSchemaError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UpdateSchemaError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for UpdateSchemaError {}

#[derive(Debug)]
pub struct UpdateSchemaRequest {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub content: Vec<ColumnDef>,
    pub doc_text: Vec<DocText>,
}

/// Full-record replace of a schema; only its owner may change it.
pub struct UpdateSchemaUseCase {
    schema_repository: Arc<dyn SchemaRepository>,
}

impl UpdateSchemaUseCase {
    pub fn new(schema_repository: Arc<dyn SchemaRepository>) -> Self {
        Self { schema_repository }
    }

    pub async fn execute(
        &self,
        caller: &AuthResult,
        request: UpdateSchemaRequest,
    ) -> Result<(), UpdateSchemaError> {
        if request.name.trim().is_empty() {
            return Err(UpdateSchemaError::ValidationError(
                "Schema name is required".to_string(),
            ));
        }

        let mut schema = self
            .schema_repository
            .find_by_id(request.id)
            .await
            .map_err(|e| UpdateSchemaError::StorageError(e.to_string()))?
            .ok_or(UpdateSchemaError::NotFound(request.id))?;

        if !schema.is_owned_by(caller.caller_id) {
            return Err(UpdateSchemaError::Unauthorized);
        }

        schema.replace(
            request.name,
            request.description,
            request.content,
            request.doc_text,
        );

        self.schema_repository
            .update(&schema)
            .await
            .map_err(|e| UpdateSchemaError::StorageError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserSchema;
    use crate::infrastructure::memory::{MemorySchemaRepository, MemoryStore};

    fn caller() -> AuthResult {
        AuthResult {
            caller_id: Uuid::new_v4(),
            caller_email: "user@example.com".to_string(),
        }
    }

    fn request(id: Uuid) -> UpdateSchemaRequest {
        UpdateSchemaRequest {
            id,
            name: "renamed".to_string(),
            description: None,
            content: vec![ColumnDef {
                name: "total".to_string(),
                column_type: "float".to_string(),
                description: None,
                example_values: None,
            }],
            doc_text: vec![],
        }
    }

    #[tokio::test]
    async fn test_owner_replaces_full_record() {
        let store = Arc::new(MemoryStore::new());
        let use_case =
            UpdateSchemaUseCase::new(Arc::new(MemorySchemaRepository::new(store.clone())));
        let me = caller();
        let schema = UserSchema::new(me.caller_id, "orders".to_string(), None, vec![], vec![]);
        let id = schema.id();
        store.insert_schema(schema).await;

        use_case.execute(&me, request(id)).await.unwrap();

        let stored = store.schema(id).await.unwrap();
        assert_eq!(stored.name(), "renamed");
        assert_eq!(stored.content()[0].name, "total");
    }

    #[tokio::test]
    async fn test_non_owner_cannot_update() {
        let store = Arc::new(MemoryStore::new());
        let use_case =
            UpdateSchemaUseCase::new(Arc::new(MemorySchemaRepository::new(store.clone())));
        let owner = caller();
        let schema = UserSchema::new(owner.caller_id, "orders".to_string(), None, vec![], vec![]);
        let id = schema.id();
        store.insert_schema(schema).await;

        let result = use_case.execute(&caller(), request(id)).await;

        assert!(matches!(result, Err(UpdateSchemaError::Unauthorized)));
        assert_eq!(store.schema(id).await.unwrap().name(), "orders");
    }

    #[tokio::test]
    async fn test_absent_schema_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let use_case = UpdateSchemaUseCase::new(Arc::new(MemorySchemaRepository::new(store)));

        let result = use_case.execute(&caller(), request(Uuid::new_v4())).await;

        assert!(matches!(result, Err(UpdateSchemaError::NotFound(_))));
    }
}
