use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::AttachedText;
use crate::domain::repositories::attached_text_repository::{
    AttachedTextRepository, AttachedTextRepositoryError,
};
use crate::infrastructure::memory::MemoryStore;

pub struct MemoryAttachedTextRepository {
    store: Arc<MemoryStore>,
}

impl MemoryAttachedTextRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AttachedTextRepository for MemoryAttachedTextRepository {
    async fn upsert(&self, row: &AttachedText) -> Result<(), AttachedTextRepositoryError> {
        self.store.replace_attached_text(row.clone()).await;
        Ok(())
    }

    async fn find_by_chat_id(
        &self,
        chat_id: Uuid,
    ) -> Result<Option<AttachedText>, AttachedTextRepositoryError> {
        Ok(self.store.attached_text(chat_id).await)
    }

    async fn delete_by_chat_id(&self, chat_id: Uuid) -> Result<(), AttachedTextRepositoryError> {
        self.store.remove_attached_text(chat_id).await;
        Ok(())
    }
}
