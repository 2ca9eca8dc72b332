use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Message;

#[derive(Debug)]
pub enum MessageRepositoryError {
    StorageError(String),
}

impl std::fmt::Display for MessageRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRepositoryError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for MessageRepositoryError {}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Saving an id that already exists replaces that row; a retried turn
    /// writes its assistant message under the same derived id.
    async fn save(&self, message: &Message) -> Result<(), MessageRepositoryError>;
    /// Messages for a chat in creation-time order.
    async fn find_by_chat_id(&self, chat_id: Uuid) -> Result<Vec<Message>, MessageRepositoryError>;
}
