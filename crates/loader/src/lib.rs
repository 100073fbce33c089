//! # Pokédex Loader
//!
//! Seeds the database from the Pokédex CSV sources. The `Loader` walks a
//! `LoadPlan` strictly in order: read a source, shape each row into a table
//! record, synthesize an upsert and execute it, one statement at a time. The
//! first failure stops the run; every statement is an idempotent upsert, so
//! the remedy is always to run the whole load again.

use configuration::Config;
use core_types::CoreError;
use database::{DbRepository, StatementExecutor, synthesize};
use std::path::PathBuf;

pub mod error;
pub mod plan;
pub mod progress;
pub mod shaping;
pub mod source;

pub use error::{LoadError, PlanError};
pub use plan::{LoadPlan, POKEDEX_PLAN, PlanEntry};
pub use progress::{BarProgress, LoadProgress, LogProgress, SilentProgress};

/// What happened to one table during a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSummary {
    pub table: String,
    pub source: String,
    pub rows_read: usize,
    pub rows_written: usize,
    pub rows_skipped: usize,
    /// Rows actually inserted or changed; conflicts resolved with DO NOTHING count zero.
    pub rows_affected: u64,
}

/// Per-table results of a completed load, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub tables: Vec<TableSummary>,
}

impl LoadSummary {
    pub fn rows_written(&self) -> usize {
        self.tables.iter().map(|t| t.rows_written).sum()
    }

    pub fn table(&self, name: &str) -> Option<&TableSummary> {
        self.tables.iter().find(|t| t.table == name)
    }
}

/// Drives a `LoadPlan` against one statement executor.
pub struct Loader<E, P> {
    data_dir: PathBuf,
    plan: LoadPlan,
    executor: E,
    progress: P,
}

impl<E: StatementExecutor, P: LoadProgress> Loader<E, P> {
    pub fn new(data_dir: impl Into<PathBuf>, plan: LoadPlan, executor: E, progress: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            plan,
            executor,
            progress,
        }
    }

    /// Runs every plan entry in order, stopping at the first error.
    pub async fn run(&self) -> Result<LoadSummary, LoadError> {
        let mut summary = LoadSummary::default();

        for entry in self.plan.entries() {
            match self.load_entry(entry).await {
                Ok(table) => summary.tables.push(table),
                Err(e) => {
                    self.progress.on_source_failed(entry.source);
                    tracing::error!(table = entry.table, source = entry.source, error = %e, "Load aborted.");
                    return Err(e);
                }
            }
        }

        tracing::info!(
            tables = summary.tables.len(),
            rows = summary.rows_written(),
            "Load complete."
        );
        Ok(summary)
    }

    async fn load_entry(&self, entry: &PlanEntry) -> Result<TableSummary, LoadError> {
        let path = self.data_dir.join(entry.source);
        let rows = tokio::task::spawn_blocking(move || source::read_source(&path))
            .await
            .map_err(|e| LoadError::Join(e.to_string()))??;

        tracing::info!(source = entry.source, table = entry.table, rows = rows.len(), "Loading table.");
        self.progress.on_source_start(entry.source, rows.len());

        let mut table = TableSummary {
            table: entry.table.to_string(),
            source: entry.source.to_string(),
            rows_read: rows.len(),
            ..TableSummary::default()
        };

        for (index, row) in rows.iter().enumerate() {
            let row_number = index + 1;
            let malformed = |source: CoreError| LoadError::MalformedRecord {
                source_name: entry.source.to_string(),
                row: row_number,
                source,
            };

            let Some(record) = (entry.shape)(row).map_err(malformed)? else {
                tracing::debug!(source = entry.source, row = row_number, "Row skipped.");
                table.rows_skipped += 1;
                self.progress.on_row();
                continue;
            };

            let statement = synthesize(entry.table, &record, entry.primary_key).map_err(malformed)?;
            tracing::debug!(sql = %statement, "Executing statement.");

            let affected = self
                .executor
                .execute(&statement)
                .await
                .map_err(|source| LoadError::StatementExecution {
                    table: entry.table.to_string(),
                    source_name: entry.source.to_string(),
                    row: row_number,
                    source,
                })?;

            table.rows_written += 1;
            table.rows_affected += affected;
            self.progress.on_row();
        }

        self.progress.on_source_complete(entry.source);
        if table.rows_skipped > 0 {
            tracing::warn!(source = entry.source, skipped = table.rows_skipped, "Some rows were skipped.");
        }
        Ok(table)
    }
}

/// Loads every Pokédex table into the database at `database_url`.
///
/// The schema must already be migrated. When `config.database.migrations_dir`
/// is set the load refuses to start while any migration there is unapplied.
pub async fn load_all<P: LoadProgress>(
    database_url: &str,
    config: &Config,
    progress: P,
) -> Result<LoadSummary, LoadError> {
    let plan = LoadPlan::new(POKEDEX_PLAN.to_vec())?;
    let pool = database::connect(
        database_url,
        config.database.max_connections,
        config.database.acquire_timeout(),
    )
    .await?;

    if let Some(dir) = &config.database.migrations_dir {
        let pending = database::pending_migrations(&pool, dir).await?;
        if pending > 0 {
            pool.close().await;
            return Err(LoadError::PendingMigrations(pending));
        }
    }

    let loader = Loader::new(
        &config.data.csv_dir,
        plan,
        DbRepository::new(pool.clone()),
        progress,
    );
    let result = loader.run().await;
    pool.close().await;
    result
}
