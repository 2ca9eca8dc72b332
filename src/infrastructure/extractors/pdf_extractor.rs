use lopdf::Document;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::application::ports::document_extractor::ExtractionError;

/// Decodes a PDF from bytes and returns its page text: trimmed non-empty
/// lines joined with `\n` per page, pages joined with a blank line in page
/// order. A page that fails to decode contributes nothing; a document that
/// fails to parse at all is an error.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractionError> {
    let doc =
        Document::load_mem(data).map_err(|e| ExtractionError::CorruptedDocument(e.to_string()))?;

    if doc.is_encrypted() {
        return Err(ExtractionError::EncryptedDocument(
            "password-protected PDF".to_string(),
        ));
    }

    let pages = doc.get_pages();

    let mut extracted: Vec<(u32, Result<String, String>)> = pages
        .into_par_iter()
        .map(|(page_num, _)| {
            let text = doc
                .extract_text(&[page_num])
                .map_err(|e| format!("Failed to extract text from page {}: {}", page_num, e));
            (page_num, text)
        })
        .collect();
    extracted.sort_by_key(|(page_num, _)| *page_num);

    let mut page_texts: Vec<String> = Vec::new();
    for (page_num, result) in extracted {
        match result {
            Ok(text) => {
                let lines: Vec<&str> = text
                    .split('\n')
                    .map(str::trim_end)
                    .filter(|line| !line.is_empty())
                    .collect();
                if !lines.is_empty() {
                    page_texts.push(lines.join("\n"));
                }
            }
            Err(e) => tracing::warn!("Skipping unreadable PDF page {}: {}", page_num, e),
        }
    }

    Ok(page_texts.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    fn pdf_with_pages(page_texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in page_texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_single_page_text_is_extracted() {
        let data = pdf_with_pages(&["Hello World"]);

        let text = extract_pdf_text(&data).unwrap();

        assert!(text.contains("Hello World"), "got: {:?}", text);
    }

    #[test]
    fn test_pages_are_joined_in_order_with_blank_lines() {
        let data = pdf_with_pages(&["First page", "Second page"]);

        let text = extract_pdf_text(&data).unwrap();

        let first = text.find("First page").unwrap();
        let second = text.find("Second page").unwrap();
        assert!(first < second);
        assert!(text.contains("\n\n"));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let data = pdf_with_pages(&["alpha", "beta", "gamma"]);

        assert_eq!(
            extract_pdf_text(&data).unwrap(),
            extract_pdf_text(&data).unwrap()
        );
    }

    #[test]
    fn test_garbage_bytes_are_a_corrupted_document() {
        let result = extract_pdf_text(b"definitely not a pdf");

        assert!(matches!(result, Err(ExtractionError::CorruptedDocument(_))));
    }
}
