//! Core Extractor implementation

use crate::document::{document_text, read_pages};
use crate::error::ExtractorError;
use crate::pattern::FieldExtractor;
use spellbook_domain::{Classifier, SpellRecord};
use std::path::Path;
use tracing::{debug, info};

/// The Extractor converts document text into classified spell records
#[derive(Debug, Clone)]
pub struct SpellExtractor {
    fields: FieldExtractor,
    classifier: Classifier,
}

impl SpellExtractor {
    /// Create an extractor that classifies with `classifier`
    pub fn new(classifier: Classifier) -> Self {
        Self {
            fields: FieldExtractor::new(),
            classifier,
        }
    }

    /// Extract records from already joined text.
    ///
    /// `source` only labels the log line.
    pub fn extract_text(&self, text: &str, source: &str) -> Vec<SpellRecord> {
        let spells: Vec<SpellRecord> = self
            .fields
            .extract(text)
            .map(|fields| {
                SpellRecord::classified(fields.name, fields.level, fields.classes, &self.classifier)
            })
            .collect();

        info!("Parsed {} spells from {}", spells.len(), source);
        spells
    }

    /// Extract records from page texts, never matching across a page break.
    pub fn extract_pages(&self, pages: &[String], source: &str) -> Vec<SpellRecord> {
        self.extract_text(&document_text(pages), source)
    }

    /// Read the document at `path` and extract its records
    pub fn extract_document(&self, path: &Path) -> Result<Vec<SpellRecord>, ExtractorError> {
        let pages = read_pages(path)?;
        debug!("Scanning {} pages of {}", pages.len(), path.display());
        Ok(self.extract_pages(&pages, &path.display().to_string()))
    }
}

impl Default for SpellExtractor {
    fn default() -> Self {
        Self::new(Classifier::default())
    }
}
