use async_trait::async_trait;

#[derive(Debug)]
pub enum FetchError {
    InvalidUrl(String),
    RequestFailed(String),
    ReadFailed(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::InvalidUrl(msg) => write!(f, "Invalid attachment URL: {}", msg),
            FetchError::RequestFailed(msg) => write!(f, "Attachment fetch failed: {}", msg),
            FetchError::ReadFailed(msg) => write!(f, "Attachment body read failed: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// An attachment pulled from its upload URL, with the content type the
/// server actually declared for it.
#[derive(Debug, Clone)]
pub struct FetchedAttachment {
    pub url: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait AttachmentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedAttachment, FetchError>;
}
