use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::AttachedText;

#[derive(Debug)]
pub enum AttachedTextRepositoryError {
    StorageError(String),
}

impl std::fmt::Display for AttachedTextRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachedTextRepositoryError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for AttachedTextRepositoryError {}

#[async_trait]
pub trait AttachedTextRepository: Send + Sync {
    /// Creates or replaces the single row for the chat. Last write wins when
    /// two turns on one chat race; there is no row-level lock.
    async fn upsert(&self, row: &AttachedText) -> Result<(), AttachedTextRepositoryError>;
    async fn find_by_chat_id(
        &self,
        chat_id: Uuid,
    ) -> Result<Option<AttachedText>, AttachedTextRepositoryError>;
    async fn delete_by_chat_id(&self, chat_id: Uuid) -> Result<(), AttachedTextRepositoryError>;
}
