//! Spellbook Storage Layer
//!
//! Implements the SpellStore trait on a single SQLite table.
//!
//! # Schema
//!
//! `spells(id, name, level, class, category)`, where `class` holds the
//! record's class list joined with commas. There is no uniqueness
//! constraint: ingesting the same document twice yields duplicate rows.
//!
//! # Examples
//!
//! ```no_run
//! use spellbook_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for spell operations
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection};
use spellbook_domain::{SpellFilter, SpellRecord, SpellStore};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of SpellStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store across tasks
/// behind a mutex, or give each thread its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the store at `path` and make sure the schema exists.
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use spellbook_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("spells.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        let store = Self { conn };
        store.initialize()?;
        debug!("Opened spell store at {}", path.as_ref().display());
        Ok(store)
    }

    /// Create the schema if it is missing. A no-op on an initialized store.
    pub fn initialize(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    fn level_from_column(value: i64) -> Result<u32, StoreError> {
        u32::try_from(value)
            .map_err(|_| StoreError::InvalidData(format!("Level out of range: {}", value)))
    }
}

impl SpellStore for SqliteStore {
    type Error = StoreError;

    fn append(&mut self, records: &[SpellRecord]) -> Result<usize, Self::Error> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO spells (name, level, class, category) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.name(),
                    i64::from(record.level()),
                    record.joined_classes(),
                    record.category(),
                ])?;
            }
        }
        tx.commit()?;

        info!("Inserted {} spells into the database", records.len());
        Ok(records.len())
    }

    fn query(&self, filter: &SpellFilter) -> Result<Vec<String>, Self::Error> {
        // instr() keeps the class test case-sensitive; LIKE would fold ASCII case.
        let mut sql = String::from(
            "SELECT name FROM spells WHERE instr(class, ?1) > 0 AND level <= ?2",
        );
        if filter.category.is_some() {
            sql.push_str(" AND category = ?3");
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = self.conn.prepare(&sql)?;
        let max_level = filter.max_level;

        let names = match &filter.category {
            Some(category) => stmt
                .query_map(params![filter.class, max_level, category], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?,
            None => stmt
                .query_map(params![filter.class, max_level], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?,
        };

        debug!(
            class = %filter.class,
            max_level = filter.max_level,
            category = ?filter.category,
            "Query matched {} spells",
            names.len()
        );
        Ok(names)
    }

    fn records(&self) -> Result<Vec<SpellRecord>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, level, class, category FROM spells ORDER BY id")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(name, level, class, category)| {
                Ok(SpellRecord::restore(
                    name,
                    Self::level_from_column(level)?,
                    SpellRecord::split_classes(&class),
                    category,
                ))
            })
            .collect()
    }

    fn count(&self) -> Result<usize, Self::Error> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM spells", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| StoreError::InvalidData(format!("Negative row count: {}", count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_column() {
        assert_eq!(SqliteStore::level_from_column(3).unwrap(), 3);
        assert!(SqliteStore::level_from_column(-1).is_err());
        assert!(SqliteStore::level_from_column(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let store = SqliteStore::new(":memory:").unwrap();
        store.initialize().unwrap();
        store.initialize().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }
}
