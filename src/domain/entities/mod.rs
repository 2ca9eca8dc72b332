pub mod attached_text;
pub mod chat;
pub mod message;
pub mod user_schema;

pub use attached_text::AttachedText;
pub use chat::Chat;
pub use message::{AttachmentRef, Message, MessagePart, MessageRole};
pub use user_schema::{ColumnDef, DocText, UserSchema};
