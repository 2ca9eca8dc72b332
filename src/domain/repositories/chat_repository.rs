use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Chat;

#[derive(Debug)]
pub enum ChatRepositoryError {
    NotFound(Uuid),
    StorageError(String),
}

impl std::fmt::Display for ChatRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatRepositoryError::NotFound(id) => write!(f, "Chat not found: {}", id),
            ChatRepositoryError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ChatRepositoryError {}

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn save(&self, chat: &Chat) -> Result<(), ChatRepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Chat>, ChatRepositoryError>;
    /// Removes the chat together with its messages and attached text. Returns
    /// false when the chat did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, ChatRepositoryError>;
}
