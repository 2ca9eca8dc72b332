use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::UserSchema;

#[derive(Debug)]
pub enum SchemaRepositoryError {
    NotFound(Uuid),
    StorageError(String),
}

impl std::fmt::Display for SchemaRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaRepositoryError::NotFound(id) => write!(f, "Schema not found: {}", id),
            SchemaRepositoryError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for SchemaRepositoryError {}

#[async_trait]
pub trait SchemaRepository: Send + Sync {
    async fn save(&self, schema: &UserSchema) -> Result<(), SchemaRepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserSchema>, SchemaRepositoryError>;
    /// All schemas owned by the user, oldest first.
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserSchema>, SchemaRepositoryError>;
    /// Full-record replace; fails with `NotFound` when the id is absent.
    async fn update(&self, schema: &UserSchema) -> Result<(), SchemaRepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, SchemaRepositoryError>;
}
