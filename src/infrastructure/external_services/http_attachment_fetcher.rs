use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::application::ports::attachment_fetcher::{
    AttachmentFetcher, FetchError, FetchedAttachment,
};

/// Pulls attachment bytes from their upload URLs. Timeout comes from
/// `ATTACHMENT_FETCH_TIMEOUT_SECS` (default 30).
pub struct HttpAttachmentFetcher {
    client: Client,
}

impl HttpAttachmentFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    pub fn from_env() -> Result<Self, reqwest::Error> {
        let timeout_secs = env::var("ATTACHMENT_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        Self::new(timeout_secs)
    }
}

#[async_trait]
impl AttachmentFetcher for HttpAttachmentFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedAttachment, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::RequestFailed(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::ReadFailed(e.to_string()))?
            .to_vec();

        Ok(FetchedAttachment {
            url: url.to_string(),
            content_type,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_malformed_url_is_rejected_without_a_request() {
        let fetcher = HttpAttachmentFetcher::new(5).unwrap();

        let result = fetcher.fetch("not a url").await;

        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}
