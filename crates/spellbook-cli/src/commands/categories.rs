//! Categories command implementation.

use crate::config::SpellbookConfig;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the categories command.
pub async fn execute_categories(config: &SpellbookConfig, formatter: &Formatter) -> Result<()> {
    let table = config.category_table()?;
    println!("{}", formatter.format_categories(&table)?);
    Ok(())
}
