//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::SpellRecord;

/// Trait for persisting spell records and answering filtered lookups
///
/// Implemented by the infrastructure layer (spellbook-store)
pub trait SpellStore {
    /// Error type for store operations
    type Error;

    /// Append records, one row each. Returns the number of rows written.
    fn append(&mut self, records: &[SpellRecord]) -> Result<usize, Self::Error>;

    /// Names of the spells matching `filter`, in storage order
    fn query(&self, filter: &SpellFilter) -> Result<Vec<String>, Self::Error>;

    /// Every stored record, in storage order
    fn records(&self) -> Result<Vec<SpellRecord>, Self::Error>;

    /// Number of stored records
    fn count(&self) -> Result<usize, Self::Error>;
}

/// Query criteria for retrieving spells
///
/// All predicates must hold for a spell to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellFilter {
    /// Case-sensitive substring of the joined class list
    pub class: String,

    /// Inclusive upper bound on level. Negative bounds match nothing.
    pub max_level: i64,

    /// Exact category, when present
    pub category: Option<String>,
}

impl SpellFilter {
    /// Filter on class and level only
    pub fn new(class: impl Into<String>, max_level: i64) -> Self {
        Self {
            class: class.into(),
            max_level,
            category: None,
        }
    }

    /// Restrict to one category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Evaluate the filter against a record in memory.
    ///
    /// The class test runs against the joined class string, the same form
    /// the store persists, so a filter may match across a separator.
    pub fn matches(&self, record: &SpellRecord) -> bool {
        record.joined_classes().contains(&self.class)
            && i64::from(record.level()) <= self.max_level
            && self
                .category
                .as_deref()
                .is_none_or(|category| record.category() == category)
    }
}
