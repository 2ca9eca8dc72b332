use std::sync::Arc;

use regex::Regex;
use uuid::Uuid;

use crate::application::ports::auth::AuthResult;
use crate::application::ports::generation::{
    ChatTurn, GenerationError, GenerationRequest, GenerationStream, TITLE_MODEL,
};
use crate::application::services::{ContextAssembler, ExtractionService, GenerationAdapter};
use crate::domain::entities::{
    AttachedText, AttachmentRef, Chat, Message, MessagePart, MessageRole, UserSchema,
};
use crate::domain::repositories::{
    AttachedTextRepository, ChatRepository, MessageRepository, SchemaRepository,
};

/// Namespace for deriving the assistant message id from the turn, so a
/// retried turn writes the same row instead of a duplicate.
const ASSISTANT_MESSAGE_NAMESPACE: Uuid = Uuid::from_u128(0x8f4e_21cc_0a3b_47d9_9c5e_6b2d_81f0_3a7c);

const TITLE_SYSTEM_PROMPT: &str = "You will generate a short title based on the first message a \
     user begins a conversation with. Ensure it is not more than 80 characters long. The title \
     should be a summary of the user's message. Do not use quotes or colons.";

const MAX_TITLE_CHARS: usize = 80;
const MAX_GENERATION_STEPS: u32 = 5;

#[derive(Debug)]
pub enum SubmitTurnError {
    Unauthorized,
    BadRequest(String),
    NotFound(String),
    StorageError(String),
    GenerationFailed(String),
}

impl std::fmt::Display for SubmitTurnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitTurnError::Unauthorized => write!(f, "Unauthorized"),
            SubmitTurnError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            SubmitTurnError::NotFound(msg) => write!(f, "Not found: {}", msg),
            SubmitTurnError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            SubmitTurnError::GenerationFailed(msg) => write!(f, "Generation failed: {}", msg),
        }
    }
}

impl std::error::Error for SubmitTurnError {}

/// One message of the client-supplied history.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub parts: Vec<MessagePart>,
    pub attachments: Vec<AttachmentRef>,
}

impl IncomingMessage {
    fn plain_text(&self) -> String {
        self.parts
            .iter()
            .map(MessagePart::as_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone)]
pub struct SubmitTurnRequest {
    pub chat_id: Uuid,
    pub messages: Vec<IncomingMessage>,
    pub model_id: String,
    pub selected_schema_ids: Vec<Uuid>,
}

pub struct SubmitTurnResponse {
    pub assistant_message_id: Uuid,
    pub stream: GenerationStream,
}

/// The turn orchestrator. One call walks a turn through authorization,
/// user-message persistence, attachment extraction, context assembly and
/// generation, and arranges the assistant-message write for when the stream
/// completes.
///
/// Ordering guarantees: the user message is durable before generation
/// starts; extraction failures degrade to an empty contribution; a failed
/// assistant-message write is logged and swallowed because the caller
/// already has the streamed reply.
pub struct SubmitTurnUseCase {
    chat_repository: Arc<dyn ChatRepository>,
    message_repository: Arc<dyn MessageRepository>,
    attached_text_repository: Arc<dyn AttachedTextRepository>,
    schema_repository: Arc<dyn SchemaRepository>,
    extraction_service: Arc<ExtractionService>,
    context_assembler: Arc<ContextAssembler>,
    generation_adapter: Arc<GenerationAdapter>,
}

impl SubmitTurnUseCase {
    pub fn new(
        chat_repository: Arc<dyn ChatRepository>,
        message_repository: Arc<dyn MessageRepository>,
        attached_text_repository: Arc<dyn AttachedTextRepository>,
        schema_repository: Arc<dyn SchemaRepository>,
        extraction_service: Arc<ExtractionService>,
        context_assembler: Arc<ContextAssembler>,
        generation_adapter: Arc<GenerationAdapter>,
    ) -> Self {
        Self {
            chat_repository,
            message_repository,
            attached_text_repository,
            schema_repository,
            extraction_service,
            context_assembler,
            generation_adapter,
        }
    }

    pub async fn execute(
        &self,
        caller: &AuthResult,
        request: SubmitTurnRequest,
    ) -> Result<SubmitTurnResponse, SubmitTurnError> {
        let user_message = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .cloned()
            .ok_or_else(|| SubmitTurnError::BadRequest("No user message found".to_string()))?;

        if !self.generation_adapter.has_model(&request.model_id) {
            return Err(SubmitTurnError::BadRequest(format!(
                "Unknown model: {}",
                request.model_id
            )));
        }

        self.resolve_or_create_chat(caller, request.chat_id, &user_message)
            .await?;

        tracing::debug!(chat_id = %request.chat_id, "Persisting user turn");
        let user_row = Message::new(
            user_message.id,
            request.chat_id,
            MessageRole::User,
            user_message.parts.clone(),
            user_message.attachments.clone(),
        );
        self.message_repository
            .save(&user_row)
            .await
            .map_err(|e| SubmitTurnError::StorageError(e.to_string()))?;

        if !user_message.attachments.is_empty() {
            self.replace_attached_text(request.chat_id, &user_message.attachments)
                .await;
        }

        let attachment_text = self.load_attached_text(request.chat_id).await;
        let schemas = self.resolve_schemas(&request.selected_schema_ids).await;

        tracing::debug!(chat_id = %request.chat_id, "Assembling context");
        let system_prompt = self.context_assembler.assemble(&attachment_text, &schemas);

        let assistant_message_id = derive_assistant_message_id(request.chat_id, user_message.id);
        let history = request
            .messages
            .iter()
            .map(|m| ChatTurn {
                role: m.role,
                content: m.plain_text(),
            })
            .filter(|turn| !turn.content.is_empty())
            .collect();

        let generation_request = GenerationRequest {
            system: system_prompt,
            history,
            max_steps: MAX_GENERATION_STEPS,
        };

        let message_repository = self.message_repository.clone();
        let chat_id = request.chat_id;
        let on_complete: crate::application::services::generation_adapter::CompletionHook =
            Box::new(move |full_text: String| {
                Box::pin(async move {
                    let assistant_row = Message::new(
                        assistant_message_id,
                        chat_id,
                        MessageRole::Assistant,
                        vec![MessagePart::text(full_text)],
                        vec![],
                    );
                    // The caller already has the streamed reply; a failed
                    // write here is logged, never surfaced.
                    if let Err(e) = message_repository.save(&assistant_row).await {
                        tracing::warn!(chat_id = %chat_id, "Failed to save assistant message: {}", e);
                    }
                })
            });

        tracing::debug!(chat_id = %request.chat_id, model = %request.model_id, "Generating");
        let stream = self
            .generation_adapter
            .generate(&request.model_id, generation_request, on_complete)
            .await
            .map_err(|e| match e {
                GenerationError::UnknownModel(id) => {
                    SubmitTurnError::BadRequest(format!("Unknown model: {}", id))
                }
                other => SubmitTurnError::GenerationFailed(other.to_string()),
            })?;

        Ok(SubmitTurnResponse {
            assistant_message_id,
            stream,
        })
    }

    async fn resolve_or_create_chat(
        &self,
        caller: &AuthResult,
        chat_id: Uuid,
        user_message: &IncomingMessage,
    ) -> Result<(), SubmitTurnError> {
        let existing = self
            .chat_repository
            .find_by_id(chat_id)
            .await
            .map_err(|e| SubmitTurnError::StorageError(e.to_string()))?;

        match existing {
            Some(chat) => {
                if !chat.is_owned_by(caller.caller_id) {
                    return Err(SubmitTurnError::Unauthorized);
                }
                Ok(())
            }
            None => {
                let title = self.derive_title(&user_message.plain_text()).await;
                let chat = Chat::new(chat_id, caller.caller_id, title);
                self.chat_repository
                    .save(&chat)
                    .await
                    .map_err(|e| SubmitTurnError::StorageError(e.to_string()))
            }
        }
    }

    /// Best-effort title from the title model; a failed call falls back to a
    /// prefix of the user's message and never aborts the turn.
    async fn derive_title(&self, user_text: &str) -> String {
        match self
            .generation_adapter
            .complete(TITLE_MODEL, TITLE_SYSTEM_PROMPT, user_text)
            .await
        {
            Ok(title) if !title.trim().is_empty() => {
                truncate_chars(title.trim(), MAX_TITLE_CHARS)
            }
            Ok(_) => fallback_title(user_text),
            Err(e) => {
                tracing::warn!("Title generation failed, using fallback: {}", e);
                fallback_title(user_text)
            }
        }
    }

    async fn replace_attached_text(&self, chat_id: Uuid, attachments: &[AttachmentRef]) {
        tracing::debug!(chat_id = %chat_id, count = attachments.len(), "Extracting attachments");
        let blob = self.extraction_service.extract_attachments(attachments).await;

        match self.attached_text_repository.find_by_chat_id(chat_id).await {
            Ok(Some(existing)) if existing.matches(&blob) => {
                tracing::debug!(chat_id = %chat_id, "Attached text unchanged, skipping write");
                return;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(chat_id = %chat_id, "Attached text lookup failed: {}", e);
            }
        }

        let row = AttachedText::new(chat_id, blob);
        if let Err(e) = self.attached_text_repository.upsert(&row).await {
            tracing::warn!(chat_id = %chat_id, "Failed to replace attached text: {}", e);
        }
    }

    async fn load_attached_text(&self, chat_id: Uuid) -> String {
        match self.attached_text_repository.find_by_chat_id(chat_id).await {
            Ok(Some(row)) => row.content().to_string(),
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!(chat_id = %chat_id, "Failed to load attached text: {}", e);
                String::new()
            }
        }
    }

    /// Unknown or unreadable schema ids are skipped; a stale selection never
    /// fails the turn.
    async fn resolve_schemas(&self, schema_ids: &[Uuid]) -> Vec<UserSchema> {
        let mut schemas = Vec::with_capacity(schema_ids.len());
        for id in schema_ids {
            match self.schema_repository.find_by_id(*id).await {
                Ok(Some(schema)) => schemas.push(schema),
                Ok(None) => tracing::warn!(schema_id = %id, "Selected schema not found, skipping"),
                Err(e) => {
                    tracing::warn!(schema_id = %id, "Schema lookup failed, skipping: {}", e)
                }
            }
        }
        schemas
    }
}

pub fn derive_assistant_message_id(chat_id: Uuid, user_message_id: Uuid) -> Uuid {
    Uuid::new_v5(
        &ASSISTANT_MESSAGE_NAMESPACE,
        format!("{}:{}", chat_id, user_message_id).as_bytes(),
    )
}

fn fallback_title(user_text: &str) -> String {
    static WHITESPACE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

    let collapsed = re.replace_all(user_text.trim(), " ");
    if collapsed.is_empty() {
        return "New chat".to_string();
    }
    truncate_chars(&collapsed, MAX_TITLE_CHARS)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
