//! Content Store: local document cache deduplicated by SHA-256

use crate::error::FetchError;
use crate::locator::DocumentReference;
use futures::stream::{self, StreamExt};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, error, info, warn};

/// Block size used when hashing files already on disk
pub const HASH_BLOCK_SIZE: usize = 4096;

/// What `ensure` did with the local copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No local copy existed; the file was written
    Created,
    /// The local copy differed and was overwritten
    Updated,
    /// The local copy already had the same content; nothing was written
    Unchanged,
}

/// A document present in the local cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedDocument {
    /// Cache file name (the reference's basename)
    pub name: String,

    /// Full path of the cached file
    pub path: PathBuf,

    /// Lowercase hex SHA-256 of the file content
    pub sha256: String,

    /// Outcome of the fetch that produced this entry
    pub status: CacheStatus,
}

/// Outcome of caching a batch of references
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Documents now present locally
    pub cached: Vec<CachedDocument>,

    /// References that could not be cached, with the reason
    pub failures: Vec<(DocumentReference, FetchError)>,
}

impl BatchReport {
    /// Number of documents written (created or updated)
    pub fn written(&self) -> usize {
        self.cached
            .iter()
            .filter(|d| d.status != CacheStatus::Unchanged)
            .count()
    }
}

/// Directory of downloaded documents, one file per basename.
///
/// Fetches for the same basename are serialized, so `ensure` may be called
/// concurrently for references that collide on their local name. Each fetch
/// holds at most one chunk in memory.
pub struct ContentStore {
    client: reqwest::Client,
    cache_dir: PathBuf,
    extension: String,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ContentStore {
    /// Create a store rooted at `cache_dir`. The directory is created lazily.
    pub fn new(client: reqwest::Client, cache_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            client,
            cache_dir: cache_dir.into(),
            extension: extension.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Cache directory
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Fetch `reference` and bring the local copy up to date.
    ///
    /// The body is streamed into `<name>.part` next to the target while it
    /// is hashed. The partial file replaces the target only when the target
    /// is missing or its SHA-256 differs, and is removed in every other case.
    pub async fn ensure(&self, reference: &DocumentReference) -> Result<CachedDocument, FetchError> {
        let path = self.cache_dir.join(&reference.name);
        let partial = partial_path(&path);

        let lock = self.lock_for(&reference.name);
        let _guard = lock.lock().await;

        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| FetchError::io(&self.cache_dir, e))?;

        let result = self.refresh(reference, &path, &partial).await;
        if result.is_err() {
            discard(&partial).await;
        }
        let (digest, status) = result?;

        Ok(CachedDocument {
            name: reference.name.clone(),
            path,
            sha256: digest,
            status,
        })
    }

    async fn refresh(
        &self,
        reference: &DocumentReference,
        path: &Path,
        partial: &Path,
    ) -> Result<(String, CacheStatus), FetchError> {
        let digest = self.download(reference, partial).await?;

        let status = match hash_file(path).await? {
            Some(existing) if existing == digest => {
                discard(partial).await;
                info!("File {} is unchanged. Skipping download.", path.display());
                CacheStatus::Unchanged
            }
            Some(_) => {
                persist(partial, path).await?;
                info!("Updated {}", path.display());
                CacheStatus::Updated
            }
            None => {
                persist(partial, path).await?;
                info!("Downloaded {}", path.display());
                CacheStatus::Created
            }
        };
        Ok((digest, status))
    }

    /// Run [`ContentStore::ensure`] over every reference, at most
    /// `concurrency` at a time. Failures are collected, never propagated.
    pub async fn ensure_all<I>(&self, references: I, concurrency: usize) -> BatchReport
    where
        I: IntoIterator<Item = DocumentReference>,
    {
        let results: Vec<_> = stream::iter(references)
            .map(|reference| async move {
                let result = self.ensure(&reference).await;
                (reference, result)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        let mut report = BatchReport::default();
        for (reference, result) in results {
            match result {
                Ok(document) => report.cached.push(document),
                Err(e) => {
                    error!("Failed to download {}: {}", reference.url, e);
                    report.failures.push((reference, e));
                }
            }
        }

        info!(
            "Cached {} documents ({} written), {} failed",
            report.cached.len(),
            report.written(),
            report.failures.len()
        );
        report
    }

    /// Cached files carrying the document extension, sorted by file name.
    ///
    /// Includes documents fetched by earlier runs. A missing cache
    /// directory is treated as empty.
    pub async fn documents(&self) -> Result<Vec<PathBuf>, FetchError> {
        let mut entries = match tokio::fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(FetchError::io(&self.cache_dir, e)),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FetchError::io(&self.cache_dir, e))?
        {
            let path = entry.path();
            let is_document = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(&self.extension));
            if is_document && path.is_file() {
                documents.push(path);
            }
        }

        documents.sort();
        Ok(documents)
    }

    /// Stream the body of `reference` into `partial`, returning its SHA-256.
    async fn download(&self, reference: &DocumentReference, partial: &Path) -> Result<String, FetchError> {
        let url = reference.url.as_str();
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let mut response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Retrieval {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut file = tokio::fs::File::create(partial)
            .await
            .map_err(|e| FetchError::io(partial, e))?;
        let mut hasher = Sha256::new();
        let mut size = 0usize;
        while let Some(chunk) = response.chunk().await.map_err(transport)? {
            hasher.update(&chunk);
            file.write_all(&chunk)
                .await
                .map_err(|e| FetchError::io(partial, e))?;
            size += chunk.len();
        }
        file.flush().await.map_err(|e| FetchError::io(partial, e))?;

        debug!("Fetched {} bytes from {}", size, url);
        Ok(hex::encode(hasher.finalize()))
    }

    fn lock_for(&self, name: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(locks.entry(name.to_string()).or_default())
    }
}

/// SHA-256 of the file at `path`, read in [`HASH_BLOCK_SIZE`] blocks.
///
/// Returns `None` when the file does not exist.
pub async fn hash_file(path: &Path) -> Result<Option<String>, FetchError> {
    let mut file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(FetchError::io(path, e)),
    };

    let mut hasher = Sha256::new();
    let mut block = [0u8; HASH_BLOCK_SIZE];
    loop {
        let read = file.read(&mut block).await.map_err(|e| FetchError::io(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&block[..read]);
    }

    Ok(Some(hex::encode(hasher.finalize())))
}

/// Suffix of the file a download streams into before it is kept
pub const PARTIAL_SUFFIX: &str = ".part";

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

async fn persist(partial: &Path, path: &Path) -> Result<(), FetchError> {
    tokio::fs::rename(partial, path)
        .await
        .map_err(|e| FetchError::io(path, e))
}

async fn discard(partial: &Path) {
    match tokio::fs::remove_file(partial).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove {}: {}", partial.display(), e),
    }
}
