use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Chat;
use crate::domain::repositories::chat_repository::{ChatRepository, ChatRepositoryError};
use crate::infrastructure::memory::MemoryStore;

pub struct MemoryChatRepository {
    store: Arc<MemoryStore>,
}

impl MemoryChatRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ChatRepository for MemoryChatRepository {
    async fn save(&self, chat: &Chat) -> Result<(), ChatRepositoryError> {
        self.store.insert_chat(chat.clone()).await;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Chat>, ChatRepositoryError> {
        Ok(self.store.chat(id).await)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ChatRepositoryError> {
        Ok(self.store.remove_chat(id).await)
    }
}
