use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Message;
use crate::domain::repositories::message_repository::{MessageRepository, MessageRepositoryError};
use crate::infrastructure::memory::MemoryStore;

pub struct MemoryMessageRepository {
    store: Arc<MemoryStore>,
}

impl MemoryMessageRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageRepository for MemoryMessageRepository {
    async fn save(&self, message: &Message) -> Result<(), MessageRepositoryError> {
        self.store.upsert_message(message.clone()).await;
        Ok(())
    }

    async fn find_by_chat_id(&self, chat_id: Uuid) -> Result<Vec<Message>, MessageRepositoryError> {
        Ok(self.store.messages_for_chat(chat_id).await)
    }
}
