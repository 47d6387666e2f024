//! Ingest command implementation.
//!
//! discover → ensure_all → initialize store → read, extract, append per
//! cached document → optional export of this run's records.

use crate::cli::IngestArgs;
use crate::config::SpellbookConfig;
use crate::error::Result;
use crate::export::{save_csv, save_xlsx};
use crate::output::Formatter;
use spellbook_domain::{Classifier, SpellRecord, SpellStore};
use spellbook_extractor::SpellExtractor;
use spellbook_fetch::{build_client, ContentStore, DocumentLocator, FetchConfig};
use spellbook_store::SqliteStore;
use std::path::PathBuf;
use tracing::{info, warn};

/// Fully resolved ingest settings: command-line flags over configuration.
#[derive(Debug, Clone)]
pub struct IngestPlan {
    /// Listing page to discover documents on
    pub source_url: String,

    /// Link filtering, rewriting and HTTP settings
    pub fetch: FetchConfig,

    /// Directory holding downloaded documents
    pub cache_dir: PathBuf,

    /// Spell database file
    pub database: PathBuf,

    /// Maximum concurrent downloads
    pub concurrency: usize,

    /// Only process documents already in the cache
    pub skip_download: bool,
}

impl IngestPlan {
    /// Merge command-line flags over the loaded configuration.
    pub fn resolve(args: &IngestArgs, config: &SpellbookConfig) -> Self {
        Self {
            source_url: args
                .source
                .clone()
                .unwrap_or_else(|| config.source.url.clone()),
            fetch: config.source.fetch.clone(),
            cache_dir: args
                .cache_dir
                .clone()
                .unwrap_or_else(|| config.cache.dir.clone()),
            database: args
                .database
                .clone()
                .unwrap_or_else(|| config.database.path.clone()),
            concurrency: args.concurrency.unwrap_or(config.cache.concurrency).max(1),
            skip_download: args.skip_download,
        }
    }
}

/// What one ingest run did.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Documents fetched or refreshed during this run
    pub downloaded: usize,

    /// Documents whose fetch failed
    pub download_failures: usize,

    /// Cached documents that were read and parsed
    pub documents: usize,

    /// Cached documents that could not be read
    pub unreadable: usize,

    /// Records extracted and stored by this run
    pub records: Vec<SpellRecord>,
}

/// Run the pipeline described by `plan`.
///
/// A listing failure or a store failure aborts the run. Failed downloads
/// and unreadable documents are logged and skipped.
pub async fn ingest(plan: &IngestPlan, classifier: Classifier) -> Result<IngestReport> {
    let mut report = IngestReport::default();
    let client = build_client(&plan.fetch)?;
    let content = ContentStore::new(client.clone(), &plan.cache_dir, plan.fetch.extension.clone());

    if plan.skip_download {
        info!("Skipping download; using documents in {}", plan.cache_dir.display());
    } else {
        let locator = DocumentLocator::new(client, plan.fetch.clone());
        let listing = locator.discover(&plan.source_url).await?;
        let batch = content.ensure_all(listing.references(), plan.concurrency).await;
        report.downloaded = batch.written();
        report.download_failures = batch.failures.len();
    }

    let mut store = SqliteStore::new(&plan.database)?;
    let extractor = SpellExtractor::new(classifier);

    for path in content.documents().await? {
        let spells = match extractor.extract_document(&path) {
            Ok(spells) => spells,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                report.unreadable += 1;
                continue;
            }
        };

        store.append(&spells)?;
        report.documents += 1;
        report.records.extend(spells);
    }

    info!(
        "Stored {} spells from {} documents into {}",
        report.records.len(),
        report.documents,
        plan.database.display()
    );
    Ok(report)
}

/// Execute the ingest command.
pub async fn execute_ingest(
    args: IngestArgs,
    config: &SpellbookConfig,
    formatter: &Formatter,
) -> Result<()> {
    let plan = IngestPlan::resolve(&args, config);
    let classifier = Classifier::new(&config.category_table()?);

    let report = ingest(&plan, classifier).await?;

    if let Some(path) = &args.csv {
        save_csv(path, &report.records)?;
    }
    if let Some(path) = &args.xlsx {
        save_xlsx(path, &report.records)?;
    }

    if !formatter.is_quiet() {
        println!(
            "{}",
            formatter.success(&format!(
                "Stored {} spell(s) from {} document(s)",
                report.records.len(),
                report.documents
            ))
        );
        if report.download_failures > 0 || report.unreadable > 0 {
            println!(
                "{}",
                formatter.warning(&format!(
                    "{} download(s) failed, {} document(s) unreadable",
                    report.download_failures, report.unreadable
                ))
            );
        }
    }

    Ok(())
}
