use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response, Sse, sse::Event, sse::KeepAlive},
};
use futures::StreamExt;

use crate::application::ports::auth::AuthProvider;
use crate::application::ports::generation::GenerationEvent;
use crate::application::use_cases::{DeleteChatUseCase, SubmitTurnUseCase};
use crate::presentation::http::dto::{
    DeleteChatQueryDto, FinishDto, MessageChunkDto, StreamErrorDto, TurnRequestDto,
};
use crate::presentation::http::error::AppError;
use crate::presentation::http::handlers::require_auth;

pub struct ChatHandler {
    auth: Arc<dyn AuthProvider>,
    submit_turn_use_case: Arc<SubmitTurnUseCase>,
    delete_chat_use_case: Arc<DeleteChatUseCase>,
}

impl ChatHandler {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        submit_turn_use_case: Arc<SubmitTurnUseCase>,
        delete_chat_use_case: Arc<DeleteChatUseCase>,
    ) -> Self {
        Self {
            auth,
            submit_turn_use_case,
            delete_chat_use_case,
        }
    }

    /// POST /api/chat: runs one turn and streams the assistant reply as SSE.
    /// Auth and validation failures are plain HTTP errors; once streaming
    /// starts, a generation failure is a single `error` event instead.
    pub async fn submit_turn(
        State(handler): State<Arc<ChatHandler>>,
        headers: HeaderMap,
        Json(body): Json<TurnRequestDto>,
    ) -> Result<Response, AppError> {
        let caller = require_auth(handler.auth.as_ref(), &headers).await?;

        let response = handler
            .submit_turn_use_case
            .execute(&caller, body.into())
            .await?;

        let message_id = response.assistant_message_id;
        let events = response.stream.map(move |event| {
            let event = match event {
                GenerationEvent::TextDelta(delta) => Event::default().event("message").data(
                    serde_json::to_string(&MessageChunkDto { delta: &delta }).unwrap_or_default(),
                ),
                GenerationEvent::Finish => Event::default().event("finish").data(
                    serde_json::to_string(&FinishDto { message_id }).unwrap_or_default(),
                ),
                GenerationEvent::Error(message) => Event::default().event("error").data(
                    serde_json::to_string(&StreamErrorDto { error: &message })
                        .unwrap_or_default(),
                ),
            };
            Ok::<_, Infallible>(event)
        });

        Ok(Sse::new(events)
            .keep_alive(KeepAlive::default())
            .into_response())
    }

    /// DELETE /api/chat?id=<uuid>
    pub async fn delete_chat(
        State(handler): State<Arc<ChatHandler>>,
        headers: HeaderMap,
        Query(query): Query<DeleteChatQueryDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let caller = require_auth(handler.auth.as_ref(), &headers).await?;

        handler
            .delete_chat_use_case
            .execute(&caller, query.id)
            .await?;

        Ok(Json(serde_json::json!({ "message": "Chat deleted" })))
    }
}
