//! Export command implementation.

use crate::cli::ExportArgs;
use crate::commands::query::open_existing;
use crate::config::SpellbookConfig;
use crate::error::{CliError, Result};
use crate::export::{save_csv, save_xlsx};
use crate::output::Formatter;
use spellbook_domain::SpellStore;

/// Execute the export command.
pub async fn execute_export(
    args: ExportArgs,
    config: &SpellbookConfig,
    formatter: &Formatter,
) -> Result<()> {
    if args.csv.is_none() && args.xlsx.is_none() {
        return Err(CliError::InvalidInput(
            "Must specify --csv and/or --xlsx".to_string(),
        ));
    }

    let database = args.database.unwrap_or_else(|| config.database.path.clone());
    let records = open_existing(&database)?.records()?;

    if let Some(path) = &args.csv {
        save_csv(path, &records)?;
        if !formatter.is_quiet() {
            println!("{}", formatter.success(&format!("Wrote {} spell(s) to {}", records.len(), path.display())));
        }
    }
    if let Some(path) = &args.xlsx {
        save_xlsx(path, &records)?;
        if !formatter.is_quiet() {
            println!("{}", formatter.success(&format!("Wrote {} spell(s) to {}", records.len(), path.display())));
        }
    }

    Ok(())
}
