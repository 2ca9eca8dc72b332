use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{AttachedText, Chat, Message, UserSchema};

/// Shared state behind the in-memory repositories. One store backs all four
/// so a chat deletion can cascade to its messages and attached text, the way
/// a relational backend would.
#[derive(Default)]
pub struct MemoryStore {
    chats: RwLock<HashMap<Uuid, Chat>>,
    messages: RwLock<HashMap<Uuid, Vec<Message>>>,
    attached_texts: RwLock<HashMap<Uuid, AttachedText>>,
    schemas: RwLock<HashMap<Uuid, UserSchema>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn chat(&self, id: Uuid) -> Option<Chat> {
        self.chats.read().await.get(&id).cloned()
    }

    pub async fn chat_count(&self) -> usize {
        self.chats.read().await.len()
    }

    pub async fn insert_chat(&self, chat: Chat) {
        self.chats.write().await.insert(chat.id(), chat);
    }

    /// Removes the chat and everything hanging off it. Returns false when
    /// the chat did not exist.
    pub async fn remove_chat(&self, id: Uuid) -> bool {
        let removed = self.chats.write().await.remove(&id).is_some();
        if removed {
            self.messages.write().await.remove(&id);
            self.attached_texts.write().await.remove(&id);
        }
        removed
    }

    /// Saves a message, replacing any existing row with the same id.
    pub async fn upsert_message(&self, message: Message) {
        let mut messages = self.messages.write().await;
        let rows = messages.entry(message.chat_id()).or_default();
        match rows.iter_mut().find(|m| m.id() == message.id()) {
            Some(existing) => *existing = message,
            None => rows.push(message),
        }
    }

    pub async fn messages_for_chat(&self, chat_id: Uuid) -> Vec<Message> {
        let mut rows = self
            .messages
            .read()
            .await
            .get(&chat_id)
            .cloned()
            .unwrap_or_default();
        rows.sort_by_key(|m| m.created_at());
        rows
    }

    pub async fn attached_text(&self, chat_id: Uuid) -> Option<AttachedText> {
        self.attached_texts.read().await.get(&chat_id).cloned()
    }

    pub async fn replace_attached_text(&self, row: AttachedText) {
        self.attached_texts.write().await.insert(row.chat_id(), row);
    }

    pub async fn remove_attached_text(&self, chat_id: Uuid) {
        self.attached_texts.write().await.remove(&chat_id);
    }

    pub async fn schema(&self, id: Uuid) -> Option<UserSchema> {
        self.schemas.read().await.get(&id).cloned()
    }

    pub async fn insert_schema(&self, schema: UserSchema) {
        self.schemas.write().await.insert(schema.id(), schema);
    }

    pub async fn schemas_for_user(&self, user_id: Uuid) -> Vec<UserSchema> {
        let mut schemas: Vec<UserSchema> = self
            .schemas
            .read()
            .await
            .values()
            .filter(|s| s.user_id() == user_id)
            .cloned()
            .collect();
        schemas.sort_by_key(|s| s.created_at());
        schemas
    }

    pub async fn remove_schema(&self, id: Uuid) -> bool {
        self.schemas.write().await.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MessagePart, MessageRole};

    #[tokio::test]
    async fn test_chat_removal_cascades() {
        let store = MemoryStore::new();
        let chat_id = Uuid::new_v4();
        store
            .insert_chat(Chat::new(chat_id, Uuid::new_v4(), "t".to_string()))
            .await;
        store
            .upsert_message(Message::new(
                Uuid::new_v4(),
                chat_id,
                MessageRole::User,
                vec![MessagePart::text("hi")],
                vec![],
            ))
            .await;
        store
            .replace_attached_text(AttachedText::new(chat_id, "blob".to_string()))
            .await;

        assert!(store.remove_chat(chat_id).await);

        assert!(store.chat(chat_id).await.is_none());
        assert!(store.messages_for_chat(chat_id).await.is_empty());
        assert!(store.attached_text(chat_id).await.is_none());
        assert!(!store.remove_chat(chat_id).await);
    }

    #[tokio::test]
    async fn test_upsert_message_replaces_same_id() {
        let store = MemoryStore::new();
        let chat_id = Uuid::new_v4();
        let message_id = Uuid::new_v4();

        store
            .upsert_message(Message::new(
                message_id,
                chat_id,
                MessageRole::Assistant,
                vec![MessagePart::text("first")],
                vec![],
            ))
            .await;
        store
            .upsert_message(Message::new(
                message_id,
                chat_id,
                MessageRole::Assistant,
                vec![MessagePart::text("second")],
                vec![],
            ))
            .await;

        let rows = store.messages_for_chat(chat_id).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].plain_text(), "second");
    }
}
