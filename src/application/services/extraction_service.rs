use std::sync::Arc;

use futures::future::join_all;

use crate::application::ports::attachment_fetcher::{AttachmentFetcher, FetchedAttachment};
use crate::application::ports::document_extractor::DocumentExtractor;
use crate::domain::entities::AttachmentRef;

/// Fetches the attachments of one turn and produces the single concatenated
/// text blob that replaces the chat's attached text.
///
/// The ordering policy is fixed so identical inputs always produce identical
/// output: all text-family files first (in input order), then all PDFs (in
/// input order), every piece joined by a blank line. An attachment that
/// fails to fetch or parse contributes nothing; the turn itself never fails
/// here.
pub struct ExtractionService {
    fetcher: Arc<dyn AttachmentFetcher>,
    extractor: Arc<dyn DocumentExtractor>,
}

impl ExtractionService {
    pub fn new(fetcher: Arc<dyn AttachmentFetcher>, extractor: Arc<dyn DocumentExtractor>) -> Self {
        Self { fetcher, extractor }
    }

    pub async fn extract_attachments(&self, attachments: &[AttachmentRef]) -> String {
        if attachments.is_empty() {
            return String::new();
        }

        // Fan out all fetches at once, then wait for every one of them.
        let fetches = attachments.iter().map(|a| self.fetcher.fetch(&a.url));
        let fetched = join_all(fetches).await;

        let mut text_files: Vec<FetchedAttachment> = Vec::new();
        let mut pdf_files: Vec<FetchedAttachment> = Vec::new();

        for (attachment, result) in attachments.iter().zip(fetched) {
            match result {
                Ok(file) => {
                    let content_type = if file.content_type.is_empty() {
                        attachment.content_type.as_str()
                    } else {
                        file.content_type.as_str()
                    };

                    if content_type.starts_with("text/") {
                        text_files.push(file);
                    } else if content_type.starts_with("application/pdf") {
                        pdf_files.push(file);
                    } else {
                        tracing::warn!(
                            "Skipping attachment {} with unsupported content type {}",
                            attachment.url,
                            content_type
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch attachment {}: {}", attachment.url, e);
                }
            }
        }

        // Second barrier: all extractions in parallel, text files first in
        // the output, PDFs after.
        let plain_results = join_all(
            text_files
                .iter()
                .map(|f| self.extractor.extract_plain(&f.bytes)),
        )
        .await;
        let pdf_results = join_all(pdf_files.iter().map(|f| self.extractor.extract_pdf(&f.bytes)))
            .await;

        let mut pieces: Vec<String> = Vec::new();

        for (file, result) in text_files.iter().zip(plain_results) {
            match result {
                Ok(text) => pieces.push(text),
                Err(e) => tracing::warn!("Failed to extract text file {}: {}", file.url, e),
            }
        }
        for (file, result) in pdf_files.iter().zip(pdf_results) {
            match result {
                Ok(text) => pieces.push(text),
                Err(e) => tracing::warn!("Failed to extract PDF {}: {}", file.url, e),
            }
        }

        pieces.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::attachment_fetcher::FetchError;
    use crate::application::ports::document_extractor::ExtractionError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MapFetcher {
        files: HashMap<String, (String, Vec<u8>)>,
    }

    #[async_trait]
    impl AttachmentFetcher for MapFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedAttachment, FetchError> {
            match self.files.get(url) {
                Some((content_type, bytes)) => Ok(FetchedAttachment {
                    url: url.to_string(),
                    content_type: content_type.clone(),
                    bytes: bytes.clone(),
                }),
                None => Err(FetchError::RequestFailed(format!("404 for {}", url))),
            }
        }
    }

    struct MarkerExtractor;

    #[async_trait]
    impl DocumentExtractor for MarkerExtractor {
        async fn extract_pdf(&self, data: &[u8]) -> Result<String, ExtractionError> {
            if data == b"broken" {
                return Err(ExtractionError::CorruptedDocument("broken".to_string()));
            }
            Ok(format!("pdf:{}", String::from_utf8_lossy(data)))
        }

        async fn extract_plain(&self, data: &[u8]) -> Result<String, ExtractionError> {
            Ok(String::from_utf8_lossy(data).into_owned())
        }
    }

    fn attachment(url: &str, content_type: &str) -> AttachmentRef {
        AttachmentRef {
            url: url.to_string(),
            content_type: content_type.to_string(),
            name: None,
        }
    }

    fn service(files: Vec<(&str, &str, &[u8])>) -> ExtractionService {
        let files = files
            .into_iter()
            .map(|(url, ct, bytes)| (url.to_string(), (ct.to_string(), bytes.to_vec())))
            .collect();
        ExtractionService::new(Arc::new(MapFetcher { files }), Arc::new(MarkerExtractor))
    }

    #[tokio::test]
    async fn test_text_files_precede_pdfs_regardless_of_input_order() {
        let service = service(vec![
            ("u/doc.pdf", "application/pdf", b"report"),
            ("u/notes.txt", "text/plain", b"notes"),
        ]);
        let attachments = vec![
            attachment("u/doc.pdf", "application/pdf"),
            attachment("u/notes.txt", "text/plain"),
        ];

        let blob = service.extract_attachments(&attachments).await;

        assert_eq!(blob, "notes\n\npdf:report");
    }

    #[tokio::test]
    async fn test_repeated_extraction_is_deterministic() {
        let service = service(vec![
            ("u/a.md", "text/markdown", b"alpha"),
            ("u/b.pdf", "application/pdf", b"beta"),
        ]);
        let attachments = vec![
            attachment("u/a.md", "text/markdown"),
            attachment("u/b.pdf", "application/pdf"),
        ];

        let first = service.extract_attachments(&attachments).await;
        let second = service.extract_attachments(&attachments).await;

        assert_eq!(first, second);
        assert_eq!(first, "alpha\n\npdf:beta");
    }

    #[tokio::test]
    async fn test_failed_fetch_contributes_nothing() {
        let service = service(vec![("u/ok.txt", "text/plain", b"kept")]);
        let attachments = vec![
            attachment("u/missing.txt", "text/plain"),
            attachment("u/ok.txt", "text/plain"),
        ];

        let blob = service.extract_attachments(&attachments).await;

        assert_eq!(blob, "kept");
    }

    #[tokio::test]
    async fn test_malformed_pdf_degrades_to_empty_contribution() {
        let service = service(vec![
            ("u/bad.pdf", "application/pdf", b"broken"),
            ("u/good.txt", "text/plain", b"fine"),
        ]);
        let attachments = vec![
            attachment("u/bad.pdf", "application/pdf"),
            attachment("u/good.txt", "text/plain"),
        ];

        let blob = service.extract_attachments(&attachments).await;

        assert_eq!(blob, "fine");
    }

    #[tokio::test]
    async fn test_unsupported_content_type_is_skipped() {
        let service = service(vec![("u/img.png", "image/png", b"\x89PNG")]);
        let attachments = vec![attachment("u/img.png", "image/png")];

        let blob = service.extract_attachments(&attachments).await;

        assert!(blob.is_empty());
    }

    #[tokio::test]
    async fn test_no_attachments_yields_empty_blob() {
        let service = service(vec![]);
        assert!(service.extract_attachments(&[]).await.is_empty());
    }
}
