//! Query façade: validates raw lookup requests and runs them against the store.
//!
//! Both the HTTP handlers and the CLI `query` command go through
//! [`QueryService`], so a request means the same thing on every surface.

use serde::Deserialize;
use spellbook_domain::{SpellFilter, SpellStore};
use spellbook_store::SqliteStore;
use std::fmt;
use std::num::IntErrorKind;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, error};

/// Query façade error
#[derive(Debug, Error)]
pub enum QueryError {
    /// The request is malformed
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The store could not answer
    #[error("Store error: {0}")]
    Store(String),
}

/// A level as submitted: forms send text, JSON callers may send a number
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LevelValue {
    /// Numeric level
    Number(i64),

    /// Level as text, parsed on validation
    Text(String),
}

impl fmt::Display for LevelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelValue::Number(n) => write!(f, "{}", n),
            LevelValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u32> for LevelValue {
    fn from(level: u32) -> Self {
        LevelValue::Number(i64::from(level))
    }
}

impl From<&str> for LevelValue {
    fn from(level: &str) -> Self {
        LevelValue::Text(level.to_string())
    }
}

/// Raw lookup request: the three fields of the query form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryRequest {
    /// Class substring to look for
    pub class: Option<String>,

    /// Maximum level, inclusive
    pub level: Option<LevelValue>,

    /// Category to restrict to; empty means any
    pub category: Option<String>,
}

impl QueryRequest {
    /// Build a request from its three fields
    pub fn new(class: impl Into<String>, level: impl Into<LevelValue>) -> Self {
        Self {
            class: Some(class.into()),
            level: Some(level.into()),
            category: None,
        }
    }

    /// Restrict the request to one category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Validate the request and turn it into a store filter
    pub fn to_filter(&self) -> Result<SpellFilter, QueryError> {
        let class = self
            .class
            .clone()
            .ok_or_else(|| QueryError::BadRequest("Missing field: class".to_string()))?;

        let level = self
            .level
            .as_ref()
            .ok_or_else(|| QueryError::BadRequest("Missing field: level".to_string()))?;
        let max_level = parse_level(level)?;

        let filter = SpellFilter::new(class, max_level);
        Ok(match self.category.as_deref() {
            Some(category) if !category.is_empty() => filter.with_category(category),
            _ => filter,
        })
    }
}

/// Any integer is a valid bound. Text beyond the `i64` range saturates,
/// which keeps it on the same side of every stored level.
fn parse_level(level: &LevelValue) -> Result<i64, QueryError> {
    match level {
        LevelValue::Number(n) => Ok(*n),
        LevelValue::Text(s) => match s.trim().parse::<i64>() {
            Ok(n) => Ok(n),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Ok(i64::MAX),
                IntErrorKind::NegOverflow => Ok(i64::MIN),
                _ => Err(QueryError::BadRequest(format!("Invalid level: '{}'", level))),
            },
        },
    }
}

/// Runs validated lookups against a shared store
#[derive(Clone)]
pub struct QueryService {
    store: Arc<Mutex<SqliteStore>>,
}

impl QueryService {
    /// Wrap a store for shared use
    pub fn new(store: SqliteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Names of the spells matching `request`
    pub fn execute(&self, request: &QueryRequest) -> Result<Vec<String>, QueryError> {
        let filter = request.to_filter()?;
        let store = self.lock()?;
        let names = store.query(&filter).map_err(|e| {
            error!("Query for class '{}' failed: {}", filter.class, e);
            QueryError::Store(e.to_string())
        })?;

        debug!(
            "Query class='{}' max_level={} category={:?} matched {} spells",
            filter.class,
            filter.max_level,
            filter.category,
            names.len()
        );
        Ok(names)
    }

    /// Number of stored spells
    pub fn spell_count(&self) -> Result<usize, QueryError> {
        self.lock()?
            .count()
            .map_err(|e| QueryError::Store(e.to_string()))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, SqliteStore>, QueryError> {
        self.store
            .lock()
            .map_err(|_| QueryError::Store("store lock poisoned".to_string()))
    }
}
