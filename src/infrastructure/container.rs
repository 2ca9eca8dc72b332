use std::sync::Arc;

use crate::{
    application::{
        ports::{
            attachment_fetcher::AttachmentFetcher,
            auth::AuthProvider,
            document_extractor::DocumentExtractor,
            generation::{
                DEFAULT_CHAT_MODEL, ModelRegistry, REASONING_CHAT_MODEL, TITLE_MODEL,
            },
        },
        services::{ContextAssembler, ExtractionService, GenerationAdapter},
        use_cases::{
            CreateSchemaUseCase, DeleteChatUseCase, DeleteSchemaUseCase, ExtractPdfUseCase,
            ListSchemasUseCase, SubmitTurnUseCase, UpdateSchemaUseCase,
        },
    },
    domain::repositories::{
        AttachedTextRepository, ChatRepository, MessageRepository, SchemaRepository,
    },
    infrastructure::{
        auth::BearerSessionAuth,
        external_services::{ChatCompletionsClient, GenerationClientConfig, HttpAttachmentFetcher},
        extractors::LocalDocumentExtractor,
        memory::{
            MemoryAttachedTextRepository, MemoryChatRepository, MemoryMessageRepository,
            MemorySchemaRepository, MemoryStore,
        },
    },
    presentation::http::{
        HttpServer,
        handlers::{ChatHandler, ExtractHandler, SchemaHandler},
    },
};

pub struct AppContainer {
    // Repositories
    pub chat_repository: Arc<dyn ChatRepository>,
    pub message_repository: Arc<dyn MessageRepository>,
    pub attached_text_repository: Arc<dyn AttachedTextRepository>,
    pub schema_repository: Arc<dyn SchemaRepository>,

    // External services
    pub auth: Arc<dyn AuthProvider>,
    pub attachment_fetcher: Arc<dyn AttachmentFetcher>,
    pub document_extractor: Arc<dyn DocumentExtractor>,
    pub model_registry: Arc<ModelRegistry>,

    // Application services
    pub extraction_service: Arc<ExtractionService>,
    pub context_assembler: Arc<ContextAssembler>,
    pub generation_adapter: Arc<GenerationAdapter>,

    // Use cases
    pub submit_turn_use_case: Arc<SubmitTurnUseCase>,
    pub delete_chat_use_case: Arc<DeleteChatUseCase>,
    pub create_schema_use_case: Arc<CreateSchemaUseCase>,
    pub list_schemas_use_case: Arc<ListSchemasUseCase>,
    pub update_schema_use_case: Arc<UpdateSchemaUseCase>,
    pub delete_schema_use_case: Arc<DeleteSchemaUseCase>,
    pub extract_pdf_use_case: Arc<ExtractPdfUseCase>,

    // HTTP handlers
    pub chat_handler: Arc<ChatHandler>,
    pub schema_handler: Arc<SchemaHandler>,
    pub extract_handler: Arc<ExtractHandler>,
}

impl AppContainer {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Create repositories over a shared store so chat deletes cascade
        let store = Arc::new(MemoryStore::new());
        let chat_repository: Arc<dyn ChatRepository> =
            Arc::new(MemoryChatRepository::new(store.clone()));
        let message_repository: Arc<dyn MessageRepository> =
            Arc::new(MemoryMessageRepository::new(store.clone()));
        let attached_text_repository: Arc<dyn AttachedTextRepository> =
            Arc::new(MemoryAttachedTextRepository::new(store.clone()));
        let schema_repository: Arc<dyn SchemaRepository> =
            Arc::new(MemorySchemaRepository::new(store));

        // Create external services
        let auth: Arc<dyn AuthProvider> = Arc::new(BearerSessionAuth::from_env());
        let attachment_fetcher: Arc<dyn AttachmentFetcher> = Arc::new(
            HttpAttachmentFetcher::from_env()
                .map_err(|e| format!("Failed to create attachment fetcher: {}", e))?,
        );
        let document_extractor: Arc<dyn DocumentExtractor> = Arc::new(LocalDocumentExtractor::new());

        // Wire the model catalogue; the reasoning slot shares the chat and
        // title slots' transport but targets a different deployment.
        let chat_deployment = std::env::var("GENERATION_CHAT_MODEL")
            .unwrap_or_else(|_| "DeepSeek-V3".to_string());
        let reasoning_deployment = std::env::var("GENERATION_REASONING_MODEL")
            .unwrap_or_else(|_| "DeepSeek-R1".to_string());

        let chat_client: Arc<ChatCompletionsClient> = Arc::new(
            ChatCompletionsClient::new(GenerationClientConfig::from_env(chat_deployment))
                .map_err(|e| format!("Failed to create generation client: {}", e))?,
        );
        let reasoning_client = Arc::new(
            ChatCompletionsClient::new(GenerationClientConfig::from_env(reasoning_deployment))
                .map_err(|e| format!("Failed to create generation client: {}", e))?,
        );

        let mut registry = ModelRegistry::new();
        registry
            .register(DEFAULT_CHAT_MODEL, chat_client.clone())
            .register(REASONING_CHAT_MODEL, reasoning_client)
            .register(TITLE_MODEL, chat_client);
        let model_registry = Arc::new(registry);

        // Create application services
        let extraction_service = Arc::new(ExtractionService::new(
            attachment_fetcher.clone(),
            document_extractor.clone(),
        ));
        let context_assembler = Arc::new(ContextAssembler::new());
        let generation_adapter = Arc::new(GenerationAdapter::new(model_registry.clone()));

        // Create use cases
        let submit_turn_use_case = Arc::new(SubmitTurnUseCase::new(
            chat_repository.clone(),
            message_repository.clone(),
            attached_text_repository.clone(),
            schema_repository.clone(),
            extraction_service.clone(),
            context_assembler.clone(),
            generation_adapter.clone(),
        ));
        let delete_chat_use_case = Arc::new(DeleteChatUseCase::new(chat_repository.clone()));
        let create_schema_use_case = Arc::new(CreateSchemaUseCase::new(schema_repository.clone()));
        let list_schemas_use_case = Arc::new(ListSchemasUseCase::new(schema_repository.clone()));
        let update_schema_use_case = Arc::new(UpdateSchemaUseCase::new(schema_repository.clone()));
        let delete_schema_use_case = Arc::new(DeleteSchemaUseCase::new(schema_repository.clone()));
        let extract_pdf_use_case = Arc::new(ExtractPdfUseCase::new(document_extractor.clone()));

        // Create HTTP handlers
        let chat_handler = Arc::new(ChatHandler::new(
            auth.clone(),
            submit_turn_use_case.clone(),
            delete_chat_use_case.clone(),
        ));
        let schema_handler = Arc::new(SchemaHandler::new(
            auth.clone(),
            create_schema_use_case.clone(),
            list_schemas_use_case.clone(),
            update_schema_use_case.clone(),
            delete_schema_use_case.clone(),
        ));
        let extract_handler = Arc::new(ExtractHandler::new(
            auth.clone(),
            extract_pdf_use_case.clone(),
        ));

        Ok(Self {
            chat_repository,
            message_repository,
            attached_text_repository,
            schema_repository,
            auth,
            attachment_fetcher,
            document_extractor,
            model_registry,
            extraction_service,
            context_assembler,
            generation_adapter,
            submit_turn_use_case,
            delete_chat_use_case,
            create_schema_use_case,
            list_schemas_use_case,
            update_schema_use_case,
            delete_schema_use_case,
            extract_pdf_use_case,
            chat_handler,
            schema_handler,
            extract_handler,
        })
    }

    pub fn into_http_server(self) -> HttpServer {
        let port = std::env::var("PORT").ok().and_then(|p| p.parse().ok());
        HttpServer::new(
            self.chat_handler,
            self.schema_handler,
            self.extract_handler,
            port,
        )
    }
}
