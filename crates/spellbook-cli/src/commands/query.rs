//! Query command implementation.

use crate::cli::QueryArgs;
use crate::config::SpellbookConfig;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use spellbook_router::query::{QueryRequest, QueryService};
use spellbook_store::SqliteStore;
use std::path::Path;

/// Open an existing spell database without creating a new one by accident.
pub fn open_existing(path: &Path) -> Result<SqliteStore> {
    if !path.exists() {
        return Err(CliError::InvalidInput(format!(
            "Database {} does not exist. Run 'spellbook ingest' first.",
            path.display()
        )));
    }
    Ok(SqliteStore::new(path)?)
}

/// Execute the query command.
pub async fn execute_query(
    args: QueryArgs,
    config: &SpellbookConfig,
    formatter: &Formatter,
) -> Result<()> {
    let database = args.database.unwrap_or_else(|| config.database.path.clone());
    let service = QueryService::new(open_existing(&database)?);

    let mut request = QueryRequest::new(args.class, args.level.as_str());
    if let Some(category) = args.category {
        request = request.with_category(category);
    }

    let names = service.execute(&request)?;

    println!("{}", formatter.format_names(&names)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let result = open_existing(&dir.path().join("absent.db"));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(!dir.path().join("absent.db").exists());
    }
}
