use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One ordered piece of message content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessagePart {
    Text { text: String },
    Reasoning { reasoning: String },
}

impl MessagePart {
    pub fn text(text: impl Into<String>) -> Self {
        MessagePart::Text { text: text.into() }
    }

    /// Visible text of this part, empty for non-text parts.
    pub fn as_text(&self) -> &str {
        match self {
            MessagePart::Text { text } => text,
            MessagePart::Reasoning { .. } => "",
        }
    }
}

/// Pointer to an uploaded file captured at message-creation time. The bytes
/// themselves are never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub url: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A single turn in a chat. Append-only: rows are never mutated after
/// creation, and ordering within a chat is by `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: Uuid,
    chat_id: Uuid,
    role: MessageRole,
    parts: Vec<MessagePart>,
    attachments: Vec<AttachmentRef>,
    created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        id: Uuid,
        chat_id: Uuid,
        role: MessageRole,
        parts: Vec<MessagePart>,
        attachments: Vec<AttachmentRef>,
    ) -> Self {
        Self {
            id,
            chat_id,
            role,
            parts,
            attachments,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn chat_id(&self) -> Uuid {
        self.chat_id
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn parts(&self) -> &[MessagePart] {
        &self.parts
    }

    pub fn attachments(&self) -> &[AttachmentRef] {
        &self.attachments
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// All text parts joined, as fed to the generation history.
    pub fn plain_text(&self) -> String {
        self.parts
            .iter()
            .map(MessagePart::as_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
