//! Spellbook Extractor
//!
//! Converts rulebook documents into classified spell records.
//!
//! # Overview
//!
//! Each cached document is read page by page, the pages are joined with a
//! page-break marker, and the text is scanned for the fixed three-line
//! layout:
//!
//! ```text
//! Fireball
//! Level: 3
//! Class: Wizard, Sorcerer
//! ```
//!
//! Every match becomes a [`SpellRecord`](spellbook_domain::SpellRecord)
//! whose category comes from the injected classifier. Text laid out any
//! other way produces no records and no error.
//!
//! # Architecture
//!
//! ```text
//! file → DocumentReader → pages → FieldExtractor → Classifier → SpellRecord*
//! ```
//!
//! # Example Usage
//!
//! ```
//! use spellbook_domain::{CategoryTable, Classifier};
//! use spellbook_extractor::SpellExtractor;
//!
//! let extractor = SpellExtractor::new(Classifier::new(&CategoryTable::builtin()));
//! let spells = extractor.extract_text("Fireball\nLevel: 3\nClass: Wizard, Sorcerer\n", "inline");
//!
//! assert_eq!(spells.len(), 1);
//! assert_eq!(spells[0].category(), "Offensive");
//! ```

#![warn(missing_docs)]

mod document;
mod error;
mod extractor;
mod pattern;


pub use document::{document_text, read_pages, DocumentReader, PdfReader, TextReader, PAGE_BREAK};
pub use error::ExtractorError;
pub use extractor::SpellExtractor;
pub use pattern::{FieldExtractor, SpellFields};
