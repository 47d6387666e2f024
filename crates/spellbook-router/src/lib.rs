//! Spellbook Router
//!
//! HTTP lookup service over an ingested spell store. Accepts `class`,
//! `level` and `category` either form-encoded on `POST /query` or as a
//! query string on `GET /spells`, and answers with a JSON array of spell
//! names.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod query;

use config::RouterConfig;
use handlers::{create_router, AppState};
use query::QueryService;
use spellbook_store::SqliteStore;
use tokio::net::TcpListener;
use tracing::info;

/// Router error
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The spell store could not be opened
    #[error("Store error: {0}")]
    Store(#[from] spellbook_store::StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the lookup HTTP server
///
/// Opens the store named in the configuration and serves until the
/// listener fails. Callers install the tracing subscriber.
pub async fn start_server(config: RouterConfig) -> Result<(), RouterError> {
    config.validate()?;

    info!("Starting Spellbook Router");
    info!("Database: {}", config.database.display());

    let store = SqliteStore::new(&config.database)?;
    let state = AppState {
        queries: QueryService::new(store),
    };
    info!("Spells available: {}", state.queries.spell_count().unwrap_or(0));

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Router listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| RouterError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_server_rejects_invalid_config() {
        let config = RouterConfig {
            bind_address: String::new(),
            ..RouterConfig::default_test_config()
        };
        let result = start_server(config).await;
        assert!(matches!(result, Err(RouterError::Config(_))));
    }

    #[tokio::test]
    async fn test_start_server_reports_store_error() {
        let config = RouterConfig {
            database: "/nonexistent/dir/spells.db".into(),
            ..RouterConfig::default_test_config()
        };
        let result = start_server(config).await;
        assert!(matches!(result, Err(RouterError::Store(_))));
    }
}
