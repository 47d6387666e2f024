//! Spellbook Domain Layer
//!
//! Core model for the spell ingestion pipeline. This crate has no external
//! dependencies and defines the value types and trait seams that the
//! infrastructure crates (store, fetch, extractor, router) build on.
//!
//! ## Key Concepts
//!
//! - **SpellRecord**: name, level, casting classes and category of one spell
//! - **CategoryTable**: static mapping from thematic category to spell names
//! - **Classifier**: total, pure lookup from spell name to category
//! - **SpellFilter**: the class / max level / category query contract
//!
//! Categories are never user-supplied: a record's category is always derived
//! from its name through a [`Classifier`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod spell;
pub mod traits;

// Re-exports for convenience
pub use category::{CategoryTable, Classifier, UNKNOWN_CATEGORY};
pub use spell::SpellRecord;
pub use traits::{SpellFilter, SpellStore};
