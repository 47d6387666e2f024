//! Command implementations.

pub mod categories;
pub mod export;
pub mod ingest;
pub mod query;
pub mod serve;

pub use self::categories::execute_categories;
pub use self::export::execute_export;
pub use self::ingest::execute_ingest;
pub use self::query::execute_query;
pub use self::serve::execute_serve;
