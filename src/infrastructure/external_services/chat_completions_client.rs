use std::collections::VecDeque;
use std::env;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::generation::{
    ChatTurn, GenerationError, GenerationEvent, GenerationRequest, GenerationProvider,
    GenerationStream,
};

#[derive(Debug, Clone)]
pub struct GenerationClientConfig {
    pub service_url: String,
    pub api_key: Option<String>,
    /// Deployment name sent on the wire, e.g. `DeepSeek-V3`.
    pub model: String,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub backoff_factor: f64,
}

impl GenerationClientConfig {
    pub fn from_env(model: String) -> Self {
        let service_url = env::var("GENERATION_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        Self {
            service_url,
            api_key: env::var("GENERATION_API_KEY").ok(),
            model,
            max_retries: 3,
            timeout_secs: env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
            backoff_factor: 1.5,
        }
    }
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionsBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    max_steps: u32,
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Streaming client for a chat-completions-compatible generation service.
/// One instance is registered per model id; the registry decides which
/// instance a turn uses.
pub struct ChatCompletionsClient {
    client: Client,
    config: GenerationClientConfig,
}

impl ChatCompletionsClient {
    pub fn new(config: GenerationClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.service_url.trim_end_matches('/')
        )
    }

    fn wire_messages<'a>(system: &'a str, history: &'a [ChatTurn]) -> Vec<WireMessage<'a>> {
        let mut messages = vec![WireMessage {
            role: "system",
            content: system,
        }];
        messages.extend(history.iter().map(|turn| WireMessage {
            role: match turn.role {
                crate::domain::entities::MessageRole::User => "user",
                crate::domain::entities::MessageRole::Assistant => "assistant",
            },
            content: &turn.content,
        }));
        messages
    }

    async fn post_completions(
        &self,
        request: &GenerationRequest,
        streaming: bool,
    ) -> Result<reqwest::Response, GenerationError> {
        let body = CompletionsBody {
            model: &self.config.model,
            messages: Self::wire_messages(&request.system, &request.history),
            stream: streaming,
            max_steps: request.max_steps,
        };

        let mut builder = self.client.post(self.endpoint()).json(&body);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GenerationError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GenerationError::RequestFailed(format!(
                "generation service returned {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

/// Events carried by one SSE frame of a chat-completions stream.
fn parse_sse_frame(frame: &str) -> Vec<GenerationEvent> {
    let mut events = Vec::new();

    for line in frame.lines() {
        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };
        let data = data.trim();

        if data == "[DONE]" {
            events.push(GenerationEvent::Finish);
            continue;
        }

        match serde_json::from_str::<StreamChunk>(data) {
            Ok(chunk) => {
                for choice in chunk.choices {
                    if let Some(content) = choice.delta.content {
                        if !content.is_empty() {
                            events.push(GenerationEvent::TextDelta(content));
                        }
                    }
                    if choice.finish_reason.is_some() {
                        events.push(GenerationEvent::Finish);
                    }
                }
            }
            Err(e) => tracing::warn!("Skipping unparseable stream frame: {}", e),
        }
    }

    events
}

struct SseDecodeState<S> {
    bytes: S,
    buffer: String,
    pending: VecDeque<GenerationEvent>,
    terminated: bool,
}

#[async_trait]
impl GenerationProvider for ChatCompletionsClient {
    async fn stream_text(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationStream, GenerationError> {
        let response = self.post_completions(&request, true).await?;
        let bytes = response.bytes_stream().boxed();

        let state = SseDecodeState {
            bytes,
            buffer: String::new(),
            pending: VecDeque::new(),
            terminated: false,
        };

        let stream = stream::unfold(state, |mut state| async move {
            loop {
                if let Some(event) = state.pending.pop_front() {
                    if matches!(event, GenerationEvent::Finish | GenerationEvent::Error(_)) {
                        state.terminated = true;
                    }
                    return Some((event, state));
                }
                if state.terminated {
                    return None;
                }

                match state.bytes.next().await {
                    Some(Ok(chunk)) => {
                        state.buffer.push_str(&String::from_utf8_lossy(&chunk));
                        while let Some(pos) = state.buffer.find("\n\n") {
                            let frame: String = state.buffer.drain(..pos + 2).collect();
                            state.pending.extend(parse_sse_frame(&frame));
                        }
                    }
                    Some(Err(e)) => {
                        state.pending.push_back(GenerationEvent::Error(e.to_string()));
                    }
                    None => {
                        // Stream closed without [DONE]; flush what remains.
                        let rest = std::mem::take(&mut state.buffer);
                        state.pending.extend(parse_sse_frame(&rest));
                        state.pending.push_back(GenerationEvent::Finish);
                    }
                }
            }
        });

        Ok(Box::pin(stream))
    }

    async fn complete_text(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let request = GenerationRequest {
            system: system.to_string(),
            history: vec![ChatTurn {
                role: crate::domain::entities::MessageRole::User,
                content: prompt.to_string(),
            }],
            max_steps: 1,
        };

        let mut attempts = 0;
        loop {
            attempts += 1;

            match self.post_completions(&request, false).await {
                Ok(response) => {
                    let parsed: CompletionResponse = response
                        .json()
                        .await
                        .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
                    return parsed
                        .choices
                        .into_iter()
                        .next()
                        .map(|c| c.message.content)
                        .ok_or_else(|| {
                            GenerationError::InvalidResponse("empty choices".to_string())
                        });
                }
                Err(e) if attempts <= self.config.max_retries => {
                    let delay = self.config.backoff_factor.powi(attempts as i32);
                    tracing::warn!(
                        "Completion attempt {} failed, retrying in {:.1}s: {}",
                        attempts,
                        delay,
                        e
                    );
                    tokio::time::sleep(Duration::from_secs_f64(delay)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_with_delta_content() {
        let frame = "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n";

        let events = parse_sse_frame(frame);

        assert_eq!(events, vec![GenerationEvent::TextDelta("Hel".to_string())]);
    }

    #[test]
    fn test_parse_done_marker() {
        assert_eq!(parse_sse_frame("data: [DONE]\n"), vec![GenerationEvent::Finish]);
    }

    #[test]
    fn test_parse_finish_reason() {
        let frame =
            "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n";

        assert_eq!(parse_sse_frame(frame), vec![GenerationEvent::Finish]);
    }

    #[test]
    fn test_non_data_lines_and_garbage_are_skipped() {
        let frame = ": keep-alive\nevent: ping\ndata: not json\n";

        assert!(parse_sse_frame(frame).is_empty());
    }

    #[test]
    fn test_wire_messages_start_with_system() {
        let history = vec![ChatTurn {
            role: crate::domain::entities::MessageRole::User,
            content: "hi".to_string(),
        }];

        let messages = ChatCompletionsClient::wire_messages("persona", &history);

        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "persona");
        assert_eq!(messages[1].role, "user");
    }
}
