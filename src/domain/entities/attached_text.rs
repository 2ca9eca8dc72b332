use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// The latest concatenated extracted text for one chat. At most one row per
/// chat: a new extraction replaces the blob instead of accumulating history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachedText {
    chat_id: Uuid,
    content: String,
    content_hash: String,
    updated_at: DateTime<Utc>,
}

impl AttachedText {
    pub fn new(chat_id: Uuid, content: String) -> Self {
        let content_hash = Self::hash_content(&content);
        Self {
            chat_id,
            content,
            content_hash,
            updated_at: Utc::now(),
        }
    }

    pub fn chat_id(&self) -> Uuid {
        self.chat_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// True when `content` would produce the same blob this row already holds,
    /// letting callers skip a redundant replace write.
    pub fn matches(&self, content: &str) -> bool {
        self.content_hash == Self::hash_content(content)
    }

    pub fn hash_content(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
