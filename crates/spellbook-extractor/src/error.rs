//! Error types for the Extractor

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a document.
///
/// Text that does not match the field pattern is not an error; it simply
/// yields no records.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The PDF could not be loaded or its text could not be extracted
    #[error("Failed to read PDF {}: {message}", path.display())]
    Pdf {
        /// Document path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// File I/O error
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Document path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// No reader handles this file type
    #[error("Unsupported document type: {}", .0.display())]
    Unsupported(PathBuf),
}
