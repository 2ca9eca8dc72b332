pub mod create_schema;
pub mod delete_chat;
pub mod delete_schema;
pub mod extract_pdf;
pub mod list_schemas;
pub mod submit_turn;
pub mod update_schema;

pub use create_schema::CreateSchemaUseCase;
pub use delete_chat::DeleteChatUseCase;
pub use delete_schema::DeleteSchemaUseCase;
pub use extract_pdf::ExtractPdfUseCase;
pub use list_schemas::ListSchemasUseCase;
pub use submit_turn::SubmitTurnUseCase;
pub use update_schema::UpdateSchemaUseCase;
