//! Spellbook CLI - Build and search a spell database from rulebook documents.

use clap::Parser;
use spellbook_cli::commands;
use spellbook_cli::logging::init_logging;
use spellbook_cli::{Cli, Command, Formatter, SpellbookConfig};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> spellbook_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = SpellbookConfig::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.output.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.output.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Ingest(args) => commands::execute_ingest(args, &config, &formatter).await?,
        Command::Query(args) => commands::execute_query(args, &config, &formatter).await?,
        Command::Export(args) => commands::execute_export(args, &config, &formatter).await?,
        Command::Serve(args) => commands::execute_serve(args, &config, &formatter).await?,
        Command::Categories => commands::execute_categories(&config, &formatter).await?,
    }

    Ok(())
}
