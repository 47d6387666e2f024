//! Serve command implementation.

use crate::cli::ServeArgs;
use crate::commands::query::open_existing;
use crate::config::SpellbookConfig;
use crate::error::Result;
use crate::output::Formatter;
use spellbook_router::start_server;

/// Execute the serve command.
pub async fn execute_serve(
    args: ServeArgs,
    config: &SpellbookConfig,
    formatter: &Formatter,
) -> Result<()> {
    let database = args.database.unwrap_or_else(|| config.database.path.clone());
    open_existing(&database)?;

    let mut router_config = config.router_config(database);
    if let Some(bind) = args.bind {
        router_config.bind_address = bind;
    }
    if let Some(port) = args.port {
        router_config.bind_port = port;
    }

    if !formatter.is_quiet() {
        println!(
            "{}",
            formatter.info(&format!("Serving spell lookups on http://{}", router_config.bind_addr()))
        );
    }

    start_server(router_config).await?;

    Ok(())
}
