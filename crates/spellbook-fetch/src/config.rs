//! Configuration for document discovery and download

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings shared by the locator and the content store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Document extension kept from the listing (matched case-sensitively)
    pub extension: String,

    /// Path segment of "view" links that is rewritten to reach raw content
    pub view_segment: String,

    /// Origin prefixed to relative links
    pub raw_origin: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl FetchConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.extension.is_empty() {
            return Err("extension must not be empty".to_string());
        }
        if self.view_segment.is_empty() {
            return Err("view_segment must not be empty".to_string());
        }
        if !(self.raw_origin.starts_with("http://") || self.raw_origin.starts_with("https://")) {
            return Err(format!("raw_origin must be an http(s) URL, got '{}'", self.raw_origin));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            extension: ".pdf".to_string(),
            view_segment: "/blob/".to_string(),
            raw_origin: "https://raw.githubusercontent.com".to_string(),
            timeout_secs: 60,
            user_agent: concat!("spellbook/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
