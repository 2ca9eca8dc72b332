pub mod chat_completions_client;
pub mod http_attachment_fetcher;

pub use chat_completions_client::{ChatCompletionsClient, GenerationClientConfig};
pub use http_attachment_fetcher::HttpAttachmentFetcher;
