use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::submit_turn::{IncomingMessage, SubmitTurnRequest};
use crate::domain::entities::{AttachmentRef, MessagePart, MessageRole};

/// Wire shape of a turn submission, matching the web client's field naming.
#[derive(Debug, Deserialize)]
pub struct TurnRequestDto {
    pub id: Uuid,
    pub messages: Vec<IncomingMessageDto>,
    #[serde(rename = "selectedChatModel")]
    pub selected_chat_model: String,
    #[serde(rename = "selectedSchemaIds", default)]
    pub selected_schema_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessageDto {
    pub id: Uuid,
    pub role: MessageRole,
    pub parts: Vec<MessagePart>,
    #[serde(
        rename = "experimental_attachments",
        alias = "attachments",
        default
    )]
    pub attachments: Vec<AttachmentRef>,
}

impl From<TurnRequestDto> for SubmitTurnRequest {
    fn from(dto: TurnRequestDto) -> Self {
        // A malformed schema id is treated like a stale one: skipped, not a
        // request failure.
        let selected_schema_ids = dto
            .selected_schema_ids
            .iter()
            .filter_map(|raw| match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    tracing::warn!("Ignoring malformed schema id {}", raw);
                    None
                }
            })
            .collect();

        SubmitTurnRequest {
            chat_id: dto.id,
            messages: dto
                .messages
                .into_iter()
                .map(|m| IncomingMessage {
                    id: m.id,
                    role: m.role,
                    parts: m.parts,
                    attachments: m.attachments,
                })
                .collect(),
            model_id: dto.selected_chat_model,
            selected_schema_ids,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteChatQueryDto {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MessageChunkDto<'a> {
    pub delta: &'a str,
}

#[derive(Debug, Serialize)]
pub struct FinishDto {
    #[serde(rename = "messageId")]
    pub message_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct StreamErrorDto<'a> {
    pub error: &'a str,
}
