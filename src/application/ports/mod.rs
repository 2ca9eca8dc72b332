pub mod attachment_fetcher;
pub mod auth;
pub mod document_extractor;
pub mod generation;

pub use attachment_fetcher::AttachmentFetcher;
pub use auth::AuthProvider;
pub use document_extractor::DocumentExtractor;
pub use generation::GenerationProvider;
