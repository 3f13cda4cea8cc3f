//! PDF → plain text.
//!
//! Page text is concatenated in document order exactly as `pdf-extract`
//! produces it; no page markers are added here. No OCR, no layout analysis.

use std::any::Any;

use bytes::Bytes;
use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF-";
// Readers tolerate leading junk as long as the header starts within the first KiB.
const MAGIC_SEARCH_WINDOW: usize = 1024;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Uploaded file is not a PDF document")]
    NotPdf,

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("PDF extraction aborted: {0}")]
    Panicked(String),
}

pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(MAGIC_SEARCH_WINDOW)];
    head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

/// Extracts the text of every page, in page order.
/// The parsed document lives only for the duration of this call.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if !looks_like_pdf(bytes) {
        return Err(ExtractionError::NotPdf);
    }
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

/// Runs [`extract_text`] on the blocking pool so large documents do not stall
/// the async workers. A panic inside the PDF library becomes an error.
pub async fn spawn_extract_text(bytes: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| {
            if e.is_panic() {
                ExtractionError::Panicked(panic_message(e.into_panic()))
            } else {
                ExtractionError::Panicked(e.to_string())
            }
        })?
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "PDF library panicked".to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Builds an in-memory PDF with one Courier text run per page.
    pub(crate) fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
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
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
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

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    fn strip_whitespace(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_looks_like_pdf_accepts_header() {
        assert!(looks_like_pdf(b"%PDF-1.7\n..."));
        assert!(looks_like_pdf(b"\xEF\xBB\xBF%PDF-1.4"));
    }

    #[test]
    fn test_looks_like_pdf_rejects_other_formats() {
        assert!(!looks_like_pdf(b""));
        assert!(!looks_like_pdf(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F']));
        assert!(!looks_like_pdf(b"plain text resume"));
    }

    #[test]
    fn test_empty_bytes_is_not_pdf() {
        assert!(matches!(extract_text(b""), Err(ExtractionError::NotPdf)));
    }

    #[test]
    fn test_jpeg_payload_is_not_pdf() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
        assert!(matches!(extract_text(&jpeg), Err(ExtractionError::NotPdf)));
    }

    #[test]
    fn test_single_page_text_is_extracted() {
        let pdf = build_pdf(&["Rustacean"]);
        let text = extract_text(&pdf).unwrap();
        assert_eq!(strip_whitespace(&text), "Rustacean");
    }

    #[test]
    fn test_pages_concatenated_in_document_order() {
        let pdf = build_pdf(&["A", "B", "C"]);
        let text = extract_text(&pdf).unwrap();
        // No separator may appear between page texts.
        assert_eq!(text.trim(), "ABC");
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let pdf = build_pdf(&["A", "B"]);
        assert_eq!(extract_text(&pdf).unwrap(), extract_text(&pdf).unwrap());
    }

    #[tokio::test]
    async fn test_spawned_extraction_matches_inline() {
        let pdf = build_pdf(&["A", "B", "C"]);
        let inline = extract_text(&pdf).unwrap();
        let spawned = spawn_extract_text(Bytes::from(pdf)).await.unwrap();
        assert_eq!(inline, spawned);
    }

    #[tokio::test]
    async fn test_spawned_extraction_of_truncated_pdf_fails() {
        let result = spawn_extract_text(Bytes::from_static(b"%PDF-1.5\n%garbage with no xref")).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_panic_message_downcasts_strings() {
        assert_eq!(panic_message(Box::new("boom")), "boom");
        assert_eq!(panic_message(Box::new(String::from("bang"))), "bang");
        assert_eq!(panic_message(Box::new(42u8)), "PDF library panicked");
    }
}
