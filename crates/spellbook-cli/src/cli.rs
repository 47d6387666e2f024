//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Spellbook - Build and search a spell database from rulebook documents.
#[derive(Debug, Parser)]
#[command(name = "spellbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(long, global = true, env = "SPELLBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download documents, extract spells and store them
    Ingest(IngestArgs),

    /// Look up spells by class, level and category
    Query(QueryArgs),

    /// Write every stored spell to CSV and/or XLSX
    Export(ExportArgs),

    /// Serve lookups over HTTP
    Serve(ServeArgs),

    /// Show the active category table
    Categories,
}

/// Arguments for the ingest command.
#[derive(Debug, Default, Parser)]
pub struct IngestArgs {
    /// Listing page to discover documents on
    #[arg(short, long)]
    pub source: Option<String>,

    /// Directory holding downloaded documents
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Spell database file
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Also write this run's spells to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Also write this run's spells to an XLSX file
    #[arg(long)]
    pub xlsx: Option<PathBuf>,

    /// Maximum concurrent downloads
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Only process documents already in the cache
    #[arg(long)]
    pub skip_download: bool,
}

/// Arguments for the query command.
#[derive(Debug, Parser)]
pub struct QueryArgs {
    /// Class name to match (case-sensitive substring)
    #[arg(long)]
    pub class: String,

    /// Maximum spell level, inclusive
    #[arg(short, long, allow_hyphen_values = true)]
    pub level: String,

    /// Restrict to one category
    #[arg(short = 'k', long)]
    pub category: Option<String>,

    /// Spell database file
    #[arg(short, long)]
    pub database: Option<PathBuf>,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// CSV output file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// XLSX output file
    #[arg(long)]
    pub xlsx: Option<PathBuf>,

    /// Spell database file
    #[arg(short, long)]
    pub database: Option<PathBuf>,
}

/// Arguments for the serve command.
#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Spell database file
    #[arg(short, long)]
    pub database: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ingest_command() {
        let cli = Cli::parse_from([
            "spellbook",
            "ingest",
            "--source",
            "https://github.com/user/books",
            "--csv",
            "spells.csv",
            "-j",
            "4",
        ]);
        match cli.command {
            Command::Ingest(args) => {
                assert_eq!(args.source.as_deref(), Some("https://github.com/user/books"));
                assert_eq!(args.csv, Some(PathBuf::from("spells.csv")));
                assert_eq!(args.concurrency, Some(4));
                assert!(!args.skip_download);
            }
            _ => panic!("Expected Ingest command"),
        }
    }

    #[test]
    fn test_query_command_with_globals() {
        let cli = Cli::parse_from([
            "spellbook",
            "query",
            "--class",
            "Wizard",
            "--level",
            "3",
            "-k",
            "Offensive",
            "--format",
            "json",
            "-vv",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Query(args) => {
                assert_eq!(args.class, "Wizard");
                assert_eq!(args.level, "3");
                assert_eq!(args.category.as_deref(), Some("Offensive"));
            }
            _ => panic!("Expected Query command"),
        }
    }

    #[test]
    fn test_query_accepts_negative_level_text() {
        // Validation happens in the query façade, not in argument parsing.
        let cli = Cli::parse_from(["spellbook", "query", "--class", "Wizard", "--level", "-1"]);
        match cli.command {
            Command::Query(args) => assert_eq!(args.level, "-1"),
            _ => panic!("Expected Query command"),
        }
    }

    #[test]
    fn test_query_requires_class() {
        let result = Cli::try_parse_from(["spellbook", "query", "--level", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Quiet.into();
        assert!(matches!(format, crate::config::OutputFormat::Quiet));
    }
}
