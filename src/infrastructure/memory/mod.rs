pub mod memory_attached_text_repository;
pub mod memory_chat_repository;
pub mod memory_message_repository;
pub mod memory_schema_repository;
pub mod store;

pub use memory_attached_text_repository::MemoryAttachedTextRepository;
pub use memory_chat_repository::MemoryChatRepository;
pub use memory_message_repository::MemoryMessageRepository;
pub use memory_schema_repository::MemorySchemaRepository;
pub use store::MemoryStore;
