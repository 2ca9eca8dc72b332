use std::pin::Pin;
use std::sync::Arc;

use futures::{Future, StreamExt, stream};
use tokio::sync::mpsc;

use crate::application::ports::generation::{
    GenerationError, GenerationEvent, GenerationRequest, GenerationStream, ModelRegistry,
};

/// Fires once per turn with the complete, unsmoothed assistant text.
pub type CompletionHook =
    Box<dyn FnOnce(String) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + 'static>;

/// Wraps a streaming generation call: forwards incremental output to the
/// caller, re-chunked at word boundaries for presentation, and fires the
/// completion hook exactly once with the full assistant text.
///
/// The live stream is one-way and append-only. When the consumer drops the
/// stream mid-turn, forwarding stops but the provider stream is still
/// drained so the completion hook fires with the whole reply; a provider
/// error instead surfaces as a single opaque error event and suppresses the
/// hook.
pub struct GenerationAdapter {
    registry: Arc<ModelRegistry>,
}

impl GenerationAdapter {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    pub fn has_model(&self, model_id: &str) -> bool {
        self.registry.contains(model_id)
    }

    /// One-shot completion on a registered model; used for title derivation.
    pub async fn complete(
        &self,
        model_id: &str,
        system: &str,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let provider = self
            .registry
            .get(model_id)
            .ok_or_else(|| GenerationError::UnknownModel(model_id.to_string()))?;

        provider.complete_text(system, prompt).await
    }

    pub async fn generate(
        &self,
        model_id: &str,
        request: GenerationRequest,
        on_complete: CompletionHook,
    ) -> Result<GenerationStream, GenerationError> {
        let provider = self
            .registry
            .get(model_id)
            .ok_or_else(|| GenerationError::UnknownModel(model_id.to_string()))?;

        let mut upstream = provider.stream_text(request).await?;
        let (tx, rx) = mpsc::channel::<GenerationEvent>(64);

        tokio::spawn(async move {
            let mut full_text = String::new();
            let mut pending = String::new();
            let mut consumer_gone = false;
            let mut failed = false;
            let mut finished = false;

            while let Some(event) = upstream.next().await {
                match event {
                    GenerationEvent::TextDelta(delta) => {
                        full_text.push_str(&delta);
                        pending.push_str(&delta);
                        if !consumer_gone {
                            for chunk in drain_word_chunks(&mut pending) {
                                if tx.send(GenerationEvent::TextDelta(chunk)).await.is_err() {
                                    consumer_gone = true;
                                    break;
                                }
                            }
                        }
                    }
                    GenerationEvent::Finish => {
                        finished = true;
                        break;
                    }
                    GenerationEvent::Error(msg) => {
                        tracing::warn!("Generation stream failed: {}", msg);
                        failed = true;
                        if !consumer_gone {
                            let _ = tx.send(GenerationEvent::Error(msg)).await;
                        }
                        break;
                    }
                }
            }

            if failed {
                return;
            }

            if !finished {
                tracing::debug!("Provider stream ended without a finish event");
            }

            if !consumer_gone {
                if !pending.is_empty() {
                    let _ = tx
                        .send(GenerationEvent::TextDelta(std::mem::take(&mut pending)))
                        .await;
                }
                let _ = tx.send(GenerationEvent::Finish).await;
            }

            on_complete(full_text).await;
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        });

        Ok(Box::pin(stream))
    }
}

/// Splits off every complete word (text up to and including its trailing
/// whitespace) from `pending`, leaving any partial trailing word in place.
fn drain_word_chunks(pending: &mut String) -> Vec<String> {
    let Some(idx) = pending.rfind(char::is_whitespace) else {
        return Vec::new();
    };
    let boundary = idx
        + pending[idx..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);

    let rest = pending.split_off(boundary);
    let ready = std::mem::replace(pending, rest);

    ready
        .split_inclusive(char::is_whitespace)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::generation::GenerationProvider;
    use async_trait::async_trait;
    use tokio::sync::oneshot;

    struct ScriptedProvider {
        events: Vec<GenerationEvent>,
    }

    #[async_trait]
    impl GenerationProvider for ScriptedProvider {
        async fn stream_text(
            &self,
            _request: GenerationRequest,
        ) -> Result<GenerationStream, GenerationError> {
            Ok(Box::pin(stream::iter(self.events.clone())))
        }

        async fn complete_text(
            &self,
            _system: &str,
            _prompt: &str,
        ) -> Result<String, GenerationError> {
            Ok("title".to_string())
        }
    }

    fn adapter_with(events: Vec<GenerationEvent>) -> GenerationAdapter {
        let mut registry = ModelRegistry::new();
        registry.register("chat-model", Arc::new(ScriptedProvider { events }));
        GenerationAdapter::new(Arc::new(registry))
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            system: "system".to_string(),
            history: vec![],
            max_steps: 5,
        }
    }

    fn hook(tx: oneshot::Sender<String>) -> CompletionHook {
        Box::new(move |text| {
            Box::pin(async move {
                let _ = tx.send(text);
            })
        })
    }

    #[test]
    fn test_drain_word_chunks_keeps_partial_tail() {
        let mut pending = "hello wor".to_string();
        let chunks = drain_word_chunks(&mut pending);

        assert_eq!(chunks, vec!["hello ".to_string()]);
        assert_eq!(pending, "wor");

        pending.push_str("ld");
        assert!(drain_word_chunks(&mut pending).is_empty());
        assert_eq!(pending, "world");
    }

    #[tokio::test]
    async fn test_completion_hook_receives_unsmoothed_text() {
        let adapter = adapter_with(vec![
            GenerationEvent::TextDelta("Hel".to_string()),
            GenerationEvent::TextDelta("lo the".to_string()),
            GenerationEvent::TextDelta("re".to_string()),
            GenerationEvent::Finish,
        ]);
        let (tx, rx) = oneshot::channel();

        let stream = adapter
            .generate("chat-model", request(), hook(tx))
            .await
            .unwrap();
        let events: Vec<_> = stream.collect().await;

        let rendered: String = events
            .iter()
            .filter_map(|e| match e {
                GenerationEvent::TextDelta(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(rendered, "Hello there");
        assert_eq!(events.last(), Some(&GenerationEvent::Finish));

        assert_eq!(rx.await.unwrap(), "Hello there");
    }

    #[tokio::test]
    async fn test_deltas_are_rechunked_at_word_boundaries() {
        let adapter = adapter_with(vec![
            GenerationEvent::TextDelta("one two thr".to_string()),
            GenerationEvent::TextDelta("ee".to_string()),
            GenerationEvent::Finish,
        ]);
        let (tx, _rx) = oneshot::channel();

        let stream = adapter
            .generate("chat-model", request(), hook(tx))
            .await
            .unwrap();
        let chunks: Vec<_> = stream
            .filter_map(|e| async move {
                match e {
                    GenerationEvent::TextDelta(t) => Some(t),
                    _ => None,
                }
            })
            .collect()
            .await;

        assert_eq!(chunks, vec!["one ", "two ", "three"]);
    }

    #[tokio::test]
    async fn test_provider_error_becomes_single_error_event_and_no_hook() {
        let adapter = adapter_with(vec![
            GenerationEvent::TextDelta("part ".to_string()),
            GenerationEvent::Error("upstream 500".to_string()),
        ]);
        let (tx, rx) = oneshot::channel();

        let stream = adapter
            .generate("chat-model", request(), hook(tx))
            .await
            .unwrap();
        let events: Vec<_> = stream.collect().await;

        assert_eq!(
            events.last(),
            Some(&GenerationEvent::Error("upstream 500".to_string()))
        );
        assert!(!events.contains(&GenerationEvent::Finish));
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_model_is_rejected_before_streaming() {
        let adapter = adapter_with(vec![]);
        let (tx, _rx) = oneshot::channel();

        let result = adapter.generate("nope", request(), hook(tx)).await;

        assert!(matches!(result, Err(GenerationError::UnknownModel(_))));
    }

    #[tokio::test]
    async fn test_dropped_consumer_still_completes_persistence() {
        let adapter = adapter_with(vec![
            GenerationEvent::TextDelta("alpha beta ".to_string()),
            GenerationEvent::TextDelta("gamma".to_string()),
            GenerationEvent::Finish,
        ]);
        let (tx, rx) = oneshot::channel();

        let stream = adapter
            .generate("chat-model", request(), hook(tx))
            .await
            .unwrap();
        drop(stream);

        assert_eq!(rx.await.unwrap(), "alpha beta gamma");
    }
}
