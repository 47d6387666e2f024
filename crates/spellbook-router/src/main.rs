//! Spellbook Router CLI
//!
//! Starts the HTTP lookup service over an existing spell database.

use spellbook_router::{config::RouterConfig, start_server, RouterError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), RouterError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        RouterConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, serving ./spells.db on 127.0.0.1:5000");
        eprintln!("Usage: spellbook-router --config <path-to-config.toml>");
        eprintln!();
        RouterConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Spellbook Router - Spell lookup over HTTP");
    println!();
    println!("USAGE:");
    println!("    spellbook-router --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENDPOINTS:");
    println!("    POST /query        Form fields: class, level, category");
    println!("    GET  /spells       Same fields as query parameters");
    println!("    GET  /health       Status and spell count");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default: '127.0.0.1')");
    println!("    - bind_port: Port number (default: 5000)");
    println!("    - database: Path to the spell database (default: 'spells.db')");
    println!();
}
