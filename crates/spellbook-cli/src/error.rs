//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Listing or download error
    #[error("Fetch error: {0}")]
    Fetch(#[from] spellbook_fetch::FetchError),

    /// Document could not be read
    #[error("Extraction error: {0}")]
    Extractor(#[from] spellbook_extractor::ExtractorError),

    /// Spell store error
    #[error("Store error: {0}")]
    Store(#[from] spellbook_store::StoreError),

    /// Rejected or failed lookup
    #[error("{0}")]
    Query(#[from] spellbook_router::query::QueryError),

    /// HTTP server error
    #[error("Server error: {0}")]
    Router(#[from] spellbook_router::RouterError),

    /// Spreadsheet packaging error
    #[error("Export error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
