//! Spellbook Fetch
//!
//! Document acquisition: discover documents on a listing page, then keep a
//! local copy of each one, rewriting it only when its content hash changes.
//!
//! # Architecture
//!
//! ```text
//! listing URL → DocumentLocator → DocumentReference* → ContentStore → cache dir
//! ```
//!
//! A failed listing fetch is fatal to the caller (nothing can be discovered);
//! a failed document fetch only affects that document.
//!
//! # Example Usage
//!
//! ```no_run
//! use spellbook_fetch::{build_client, ContentStore, DocumentLocator, FetchConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FetchConfig::default();
//! let client = build_client(&config)?;
//!
//! let locator = DocumentLocator::new(client.clone(), config.clone());
//! let listing = locator.discover("https://github.com/user/books").await?;
//!
//! let store = ContentStore::new(client, "pdf_files", config.extension.clone());
//! let report = store.ensure_all(listing.references(), 1).await;
//! println!("cached {}, failed {}", report.cached.len(), report.failures.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod locator;

pub use cache::{hash_file, BatchReport, CacheStatus, CachedDocument, ContentStore, HASH_BLOCK_SIZE};
pub use config::FetchConfig;
pub use error::FetchError;
pub use locator::{normalize_link, DocumentLocator, DocumentReference, SourceListing};

/// Build the HTTP client shared by the locator and the content store
pub fn build_client(config: &FetchConfig) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(FetchError::Client)
}
