use std::sync::Arc;

use crate::application::ports::auth::AuthResult;
use crate::domain::entities::UserSchema;
use crate::domain::repositories::SchemaRepository;

#[derive(Debug)]
pub enum ListSchemasError {
    StorageError(String),
}

impl std::fmt::Display for ListSchemasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListSchemasError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ListSchemasError {}

pub struct ListSchemasUseCase {
    schema_repository: Arc<dyn SchemaRepository>,
}

impl ListSchemasUseCase {
    pub fn new(schema_repository: Arc<dyn SchemaRepository>) -> Self {
        Self { schema_repository }
    }

    /// Every schema owned by the caller; callers never see other users' rows.
    pub async fn execute(&self, caller: &AuthResult) -> Result<Vec<UserSchema>, ListSchemasError> {
        self.schema_repository
            .find_by_user_id(caller.caller_id)
            .await
            .map_err(|e| ListSchemasError::StorageError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::{MemorySchemaRepository, MemoryStore};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_lists_only_the_callers_schemas() {
        let store = Arc::new(MemoryStore::new());
        let use_case =
            ListSchemasUseCase::new(Arc::new(MemorySchemaRepository::new(store.clone())));
        let me = AuthResult {
            caller_id: Uuid::new_v4(),
            caller_email: "me@example.com".to_string(),
        };

        store
            .insert_schema(UserSchema::new(
                me.caller_id,
                "mine".to_string(),
                None,
                vec![],
                vec![],
            ))
            .await;
        store
            .insert_schema(UserSchema::new(
                Uuid::new_v4(),
                "theirs".to_string(),
                None,
                vec![],
                vec![],
            ))
            .await;

        let schemas = use_case.execute(&me).await.unwrap();

        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].name(), "mine");
    }
}
