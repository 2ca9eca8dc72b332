pub mod attached_text_repository;
pub mod chat_repository;
pub mod message_repository;
pub mod schema_repository;

pub use attached_text_repository::AttachedTextRepository;
pub use chat_repository::ChatRepository;
pub use message_repository::MessageRepository;
pub use schema_repository::SchemaRepository;
