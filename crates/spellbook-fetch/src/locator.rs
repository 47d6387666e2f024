//! Document Locator: turns a source listing page into fetchable references

use crate::config::FetchConfig;
use crate::error::FetchError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::{info, warn};
use url::Url;

/// Anchor targets: `<a ... href="...">`, either quote style.
static ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("anchor pattern is valid")
});

/// A resolved, directly fetchable document location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReference {
    /// Basename of the URL path; also the local cache file name
    pub name: String,

    /// Raw-content URL
    pub url: Url,
}

impl DocumentReference {
    /// Build a reference from an absolute URL, deriving its basename.
    pub fn from_url(url: Url) -> Result<Self, FetchError> {
        let name = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .map(str::to_string)
            .ok_or_else(|| FetchError::InvalidUrl {
                url: url.to_string(),
                reason: "no file name in path".to_string(),
            })?;
        Ok(Self { name, url })
    }

    /// Parse `url` and build a reference from it.
    pub fn parse(url: &str) -> Result<Self, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_url(parsed)
    }
}

impl fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// Fetches a listing page and exposes the documents it links to
pub struct DocumentLocator {
    client: reqwest::Client,
    config: FetchConfig,
}

impl DocumentLocator {
    /// Create a locator using `client` for the listing request
    pub fn new(client: reqwest::Client, config: FetchConfig) -> Self {
        Self { client, config }
    }

    /// Fetch the listing at `listing_url`.
    ///
    /// Fails with [`FetchError::Retrieval`] on a non-success status and
    /// [`FetchError::Transport`] when no response arrives. Links are parsed
    /// lazily by [`SourceListing::references`].
    pub async fn discover(&self, listing_url: &str) -> Result<SourceListing, FetchError> {
        let response = self
            .client
            .get(listing_url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: listing_url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Retrieval {
                url: listing_url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Transport {
            url: listing_url.to_string(),
            source,
        })?;

        info!("Fetched listing {} ({} bytes)", listing_url, body.len());
        Ok(SourceListing::from_html(listing_url, body, self.config.clone()))
    }
}

/// A fetched listing page
#[derive(Debug, Clone)]
pub struct SourceListing {
    url: String,
    body: String,
    config: FetchConfig,
}

impl SourceListing {
    /// Wrap an already fetched page body
    pub fn from_html(url: impl Into<String>, body: impl Into<String>, config: FetchConfig) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
            config,
        }
    }

    /// URL the listing was fetched from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Document references in page order.
    ///
    /// Only links ending in the configured extension are kept. Identical
    /// links are yielded once per occurrence.
    pub fn references(&self) -> impl Iterator<Item = DocumentReference> + '_ {
        ANCHOR_HREF
            .captures_iter(&self.body)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().replace("&amp;", "&"))
            .filter(|href| href.ends_with(&self.config.extension))
            .filter_map(|href| {
                let raw = normalize_link(&href, &self.config);
                match DocumentReference::parse(&raw) {
                    Ok(reference) => Some(reference),
                    Err(e) => {
                        warn!("Skipping link '{}' on {}: {}", href, self.url, e);
                        None
                    }
                }
            })
    }
}

/// Rewrite a listing link into a raw-content URL.
///
/// The view segment is replaced by `/`. Absolute `http(s)` links keep their
/// origin; anything else is treated as a path under `raw_origin`.
pub fn normalize_link(href: &str, config: &FetchConfig) -> String {
    let raw = href.replace(&config.view_segment, "/");
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw;
    }

    let origin = config.raw_origin.trim_end_matches('/');
    if raw.starts_with('/') {
        format!("{}{}", origin, raw)
    } else {
        format!("{}/{}", origin, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(body: &str) -> SourceListing {
        SourceListing::from_html("https://github.com/user/books", body, FetchConfig::default())
    }

    #[test]
    fn test_normalize_relative_view_link() {
        let raw = normalize_link("/user/books/blob/main/Players%20Handbook.pdf", &FetchConfig::default());
        assert_eq!(
            raw,
            "https://raw.githubusercontent.com/user/books/main/Players%20Handbook.pdf"
        );
    }

    #[test]
    fn test_normalize_absolute_link_keeps_origin() {
        let raw = normalize_link("https://example.com/files/core.pdf", &FetchConfig::default());
        assert_eq!(raw, "https://example.com/files/core.pdf");
    }

    #[test]
    fn test_normalize_relative_without_slash() {
        let raw = normalize_link("docs/core.pdf", &FetchConfig::default());
        assert_eq!(raw, "https://raw.githubusercontent.com/docs/core.pdf");
    }

    #[test]
    fn test_references_filter_and_order() {
        let page = listing(
            r#"<html><body>
            <a class="js-navigation-open" href="/user/books/blob/main/Spells.pdf">Spells</a>
            <a href="/user/books/blob/main/README.md">Readme</a>
            <a href='https://example.com/Monsters.pdf'>Monsters</a>
            <a href="/user/books/blob/main/Upper.PDF">Upper</a>
            <link href="/style.pdf">
            <a href="/user/books/blob/main/Spells.pdf">Again</a>
            </body></html>"#,
        );

        let refs: Vec<_> = page.references().collect();
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].name, "Spells.pdf");
        assert_eq!(
            refs[0].url.as_str(),
            "https://raw.githubusercontent.com/user/books/main/Spells.pdf"
        );
        assert_eq!(refs[1].name, "Monsters.pdf");
        assert_eq!(refs[1].url.as_str(), "https://example.com/Monsters.pdf");
        assert_eq!(refs[2], refs[0]);
    }

    #[test]
    fn test_references_is_lazy_and_restartable() {
        let page = listing(r#"<a href="/a/blob/b/one.pdf"></a><a href="/a/blob/b/two.pdf"></a>"#);
        let first = page.references().next().unwrap();
        assert_eq!(first.name, "one.pdf");
        assert_eq!(page.references().count(), 2);
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(listing("<html></html>").references().count(), 0);
    }

    #[test]
    fn test_reference_requires_file_name() {
        assert!(DocumentReference::parse("https://example.com/").is_err());
        assert!(DocumentReference::parse("not a url").is_err());
        let reference = DocumentReference::parse("https://example.com/a/b/c.pdf").unwrap();
        assert_eq!(reference.name, "c.pdf");
    }
}
