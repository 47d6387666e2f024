//! Error types for document acquisition

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or caching documents
#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("Failed to fetch {url}: HTTP {status}")]
    Retrieval {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The request never produced a response (DNS, connect, timeout, body read)
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying client error
        source: reqwest::Error,
    },

    /// Local cache I/O error
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory being accessed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A URL could not be parsed
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// Offending URL text
        url: String,
        /// Parser message
        reason: String,
    },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Whether this error came from talking to the remote source,
    /// as opposed to local storage.
    pub fn is_retrieval(&self) -> bool {
        matches!(self, FetchError::Retrieval { .. } | FetchError::Transport { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_message_includes_url_and_status() {
        let err = FetchError::Retrieval {
            url: "https://example.com/a.pdf".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "Failed to fetch https://example.com/a.pdf: HTTP 404");
        assert!(err.is_retrieval());
    }

    #[test]
    fn test_io_is_not_retrieval() {
        let err = FetchError::io(
            "cache/a.pdf",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_retrieval());
        assert!(err.to_string().contains("cache/a.pdf"));
    }
}
