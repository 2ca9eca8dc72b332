use std::sync::Arc;

use uuid::Uuid;

use crate::application::ports::auth::AuthResult;
use crate::domain::repositories::ChatRepository;

#[derive(Debug)]
pub enum DeleteChatError {
    Unauthorized,
    NotFound(Uuid),
    StorageError(String),
}

impl std::fmt::Display for DeleteChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteChatError::Unauthorized => write!(f, "Unauthorized"),
            DeleteChatError::NotFound(id) => write!(f, "Chat not found: {}", id),
            DeleteChatError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteChatError {}

/// Removes a chat after verifying ownership; messages and attached text go
/// with it (cascade is the storage layer's job).
pub struct DeleteChatUseCase {
    chat_repository: Arc<dyn ChatRepository>,
}

impl DeleteChatUseCase {
    pub fn new(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self { chat_repository }
    }

    pub async fn execute(&self, caller: &AuthResult, chat_id: Uuid) -> Result<(), DeleteChatError> {
        let chat = self
            .chat_repository
            .find_by_id(chat_id)
            .await
            .map_err(|e| DeleteChatError::StorageError(e.to_string()))?
            .ok_or(DeleteChatError::NotFound(chat_id))?;

        if !chat.is_owned_by(caller.caller_id) {
            return Err(DeleteChatError::Unauthorized);
        }

        self.chat_repository
            .delete(chat_id)
            .await
            .map_err(|e| DeleteChatError::StorageError(e.to_string()))?;

        tracing::info!(chat_id = %chat_id, "Chat deleted");
        Ok(())
    }
}
