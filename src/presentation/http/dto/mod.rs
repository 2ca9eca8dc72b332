pub mod chat_dto;
pub mod extract_dto;
pub mod schema_dto;

pub use chat_dto::*;
pub use extract_dto::*;
pub use schema_dto::*;
