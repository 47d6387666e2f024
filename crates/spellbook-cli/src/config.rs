//! Configuration management for the CLI.
//!
//! Settings come from `--config <file>`, then `~/.spellbook/config.toml`,
//! then built-in defaults. Every section is optional.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use spellbook_domain::CategoryTable;
use spellbook_fetch::FetchConfig;
use spellbook_router::config::RouterConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpellbookConfig {
    /// Where documents are discovered
    #[serde(default)]
    pub source: SourceConfig,

    /// Local document cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Spell database
    #[serde(default)]
    pub database: DatabaseConfig,

    /// HTTP lookup service
    #[serde(default)]
    pub server: ServerConfig,

    /// Terminal output
    #[serde(default)]
    pub output: OutputSettings,

    /// Category table override; the built-in table is used when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategoryEntry>,
}

/// Document source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Listing page to discover documents on
    #[serde(default = "default_source_url")]
    pub url: String,

    /// Link filtering and rewriting
    #[serde(flatten)]
    pub fetch: FetchConfig,
}

/// Document cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding downloaded documents
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,

    /// Maximum concurrent downloads
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

/// Spell database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

/// HTTP service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Terminal output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// One `[[categories]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Category name
    pub name: String,

    /// Canonical spell names in the category
    #[serde(default)]
    pub spells: Vec<String>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl SpellbookConfig {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".spellbook").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise the default path is read when
    /// present, and built-in defaults are used when it is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Check every section, including the category table.
    pub fn validate(&self) -> Result<()> {
        if self.source.url.trim().is_empty() {
            return Err(CliError::Config("source.url must not be empty".into()));
        }
        self.source
            .fetch
            .validate()
            .map_err(|e| CliError::Config(format!("source: {}", e)))?;
        if self.cache.concurrency == 0 {
            return Err(CliError::Config("cache.concurrency must be at least 1".into()));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(CliError::Config("database.path must not be empty".into()));
        }
        self.category_table()?;
        Ok(())
    }

    /// The active category table: the `[[categories]]` override, or the
    /// built-in table when none is configured.
    pub fn category_table(&self) -> Result<CategoryTable> {
        if self.categories.is_empty() {
            return Ok(CategoryTable::builtin());
        }

        let table = CategoryTable::new(
            self.categories
                .iter()
                .map(|entry| (entry.name.clone(), entry.spells.clone())),
        )
        .map_err(CliError::Config)?;
        table.validate().map_err(CliError::Config)?;
        Ok(table)
    }

    /// Router settings for `database`, using the configured bind address.
    pub fn router_config(&self, database: PathBuf) -> RouterConfig {
        RouterConfig {
            bind_address: self.server.bind_address.clone(),
            bind_port: self.server.port,
            database,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            concurrency: default_concurrency(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_source_url() -> String {
    "https://github.com/gman4161/DnD-3.5e-Books".to_string()
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("pdf_files")
}

fn default_concurrency() -> usize {
    1
}

fn default_database_path() -> PathBuf {
    PathBuf::from("spells.db")
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
