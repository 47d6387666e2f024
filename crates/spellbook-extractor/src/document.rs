//! Document readers: turn a cached file into per-page text

use crate::error::ExtractorError;
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// Marker placed between pages when they are joined for matching.
///
/// None of the field pattern's character classes accept it, so a spell
/// whose lines straddle a page break is never reassembled.
pub const PAGE_BREAK: char = '\u{000C}';

/// Reads the text of a document, one string per page
pub trait DocumentReader {
    /// Page texts in document order
    fn read_pages(&self, path: &Path) -> Result<Vec<String>, ExtractorError>;
}

/// PDF text extraction via lopdf
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl DocumentReader for PdfReader {
    fn read_pages(&self, path: &Path) -> Result<Vec<String>, ExtractorError> {
        let pdf_error = |e: lopdf::Error| ExtractorError::Pdf {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let doc = Document::load(path).map_err(pdf_error)?;
        let mut pages = Vec::new();
        for page_number in doc.get_pages().into_keys() {
            pages.push(doc.extract_text(&[page_number]).map_err(pdf_error)?);
        }

        debug!("Read {} pages from {}", pages.len(), path.display());
        Ok(pages)
    }
}

/// Plain-text documents; pages are separated by form feeds (as pdftotext emits)
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReader;

impl DocumentReader for TextReader {
    fn read_pages(&self, path: &Path) -> Result<Vec<String>, ExtractorError> {
        let text = std::fs::read_to_string(path).map_err(|source| ExtractorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(text.split(PAGE_BREAK).map(str::to_string).collect())
    }
}

/// Read `path` with the reader matching its extension (`.pdf` or `.txt`).
pub fn read_pages(path: &Path) -> Result<Vec<String>, ExtractorError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => PdfReader.read_pages(path),
        Some("txt") => TextReader.read_pages(path),
        _ => Err(ExtractorError::Unsupported(path.to_path_buf())),
    }
}

/// Concatenate page texts in order, separated by [`PAGE_BREAK`].
pub fn document_text(pages: &[String]) -> String {
    pages.join(PAGE_BREAK.to_string().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    fn write_pdf(path: &Path, lines: &[&str]) {
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

        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
        ];
        for line in lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_document_text_joins_with_page_break() {
        let pages = vec!["one".to_string(), "two".to_string()];
        assert_eq!(document_text(&pages), "one\u{000C}two");
        assert_eq!(document_text(&[]), "");
    }

    #[test]
    fn test_text_reader_splits_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.txt");
        std::fs::write(&path, "page one\u{000C}page two").unwrap();

        let pages = read_pages(&path).unwrap();
        assert_eq!(pages, vec!["page one".to_string(), "page two".to_string()]);
    }

    #[test]
    fn test_pdf_reader_extracts_page_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.pdf");
        write_pdf(&path, &["Fireball"]);

        let pages = read_pages(&path).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("Fireball"));
    }

    #[test]
    fn test_invalid_pdf_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();

        assert!(matches!(read_pages(&path), Err(ExtractorError::Pdf { .. })));
    }

    #[test]
    fn test_unsupported_extension() {
        let path = Path::new("notes.md");
        assert!(matches!(read_pages(path), Err(ExtractorError::Unsupported(_))));
    }

    #[test]
    fn test_missing_text_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_pages(&dir.path().join("absent.txt"));
        assert!(matches!(result, Err(ExtractorError::Io { .. })));
    }
}
