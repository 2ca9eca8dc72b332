use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures::Stream;

use crate::domain::entities::MessageRole;

pub const DEFAULT_CHAT_MODEL: &str = "chat-model";
pub const REASONING_CHAT_MODEL: &str = "chat-model-reasoning";
pub const TITLE_MODEL: &str = "title-model";

/// One flattened turn of the conversation as sent to the model.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system: String,
    pub history: Vec<ChatTurn>,
    /// Upper bound on internal reasoning/tool steps for one turn.
    pub max_steps: u32,
}

/// Incremental output of a streaming generation call. `Finish` and `Error`
/// are both terminal; a well-behaved provider emits exactly one of them.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    TextDelta(String),
    Finish,
    Error(String),
}

#[derive(Debug)]
pub enum GenerationError {
    UnknownModel(String),
    RequestFailed(String),
    InvalidResponse(String),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::UnknownModel(id) => write!(f, "Unknown model: {}", id),
            GenerationError::RequestFailed(msg) => write!(f, "Generation request failed: {}", msg),
            GenerationError::InvalidResponse(msg) => {
                write!(f, "Invalid generation response: {}", msg)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

pub type GenerationStream = Pin<Box<dyn Stream<Item = GenerationEvent> + Send>>;

#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Starts a streaming completion for the given system prompt and history.
    async fn stream_text(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationStream, GenerationError>;

    /// One-shot non-streaming completion, used for title derivation.
    async fn complete_text(&self, system: &str, prompt: &str)
    -> Result<String, GenerationError>;
}

/// Explicit model-id to generation-strategy map, built once at startup and
/// passed into the adapter at construction. There is no process-wide
/// registry.
#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<String, Arc<dyn GenerationProvider>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        model_id: impl Into<String>,
        provider: Arc<dyn GenerationProvider>,
    ) -> &mut Self {
        self.models.insert(model_id.into(), provider);
        self
    }

    pub fn get(&self, model_id: &str) -> Option<Arc<dyn GenerationProvider>> {
        self.models.get(model_id).cloned()
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.models.contains_key(model_id)
    }
}

