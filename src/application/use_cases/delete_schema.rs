use std::sync::Arc;

use uuid::Uuid;

use crate::application::ports::auth::AuthResult;
use crate::domain::repositories::SchemaRepository;

#[derive(Debug)]
pub enum DeleteSchemaError {
    Unauthorized,
    NotFound(Uuid),
    StorageError(String),
}

impl std::fmt::Display for DeleteSchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteSchemaError::Unauthorized => write!(f, "Unauthorized"),
            DeleteSchemaError::NotFound(id) => write!(f, "Schema not found: {}", id),
            DeleteSchemaError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteSchemaError {}

pub struct DeleteSchemaUseCase {
    schema_repository: Arc<dyn SchemaRepository>,
}

impl DeleteSchemaUseCase {
    pub fn new(schema_repository: Arc<dyn SchemaRepository>) -> Self {
        Self { schema_repository }
    }

    pub async fn execute(
        &self,
        caller: &AuthResult,
        schema_id: Uuid,
    ) -> Result<(), DeleteSchemaError> {
        let schema = self
            .schema_repository
            .find_by_id(schema_id)
            .await
            .map_err(|e| DeleteSchemaError::StorageError(e.to_string()))?
            .ok_or(DeleteSchemaError::NotFound(schema_id))?;

        if !schema.is_owned_by(caller.caller_id) {
            return Err(DeleteSchemaError::Unauthorized);
        }

        self.schema_repository
            .delete(schema_id)
            .await
            .map_err(|e| DeleteSchemaError::StorageError(e.to_string()))?;

        Ok(())
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

    #[tokio::test]
    async fn test_owner_deletes_schema() {
        let store = Arc::new(MemoryStore::new());
        let use_case =
            DeleteSchemaUseCase::new(Arc::new(MemorySchemaRepository::new(store.clone())));
        let me = caller();
        let schema = UserSchema::new(me.caller_id, "tmp".to_string(), None, vec![], vec![]);
        let id = schema.id();
        store.insert_schema(schema).await;

        use_case.execute(&me, id).await.unwrap();

        assert!(store.schema(id).await.is_none());
    }

    #[tokio::test]
    async fn test_non_owner_cannot_delete() {
        let store = Arc::new(MemoryStore::new());
        let use_case =
            DeleteSchemaUseCase::new(Arc::new(MemorySchemaRepository::new(store.clone())));
        let owner = caller();
        let schema = UserSchema::new(owner.caller_id, "tmp".to_string(), None, vec![], vec![]);
        let id = schema.id();
        store.insert_schema(schema).await;

        let result = use_case.execute(&caller(), id).await;

        assert!(matches!(result, Err(DeleteSchemaError::Unauthorized)));
        assert!(store.schema(id).await.is_some());
    }
}
