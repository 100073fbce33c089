use crate::error::DbError;
use sqlx::migrate::{Migrate, Migrator};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database at `database_url`.
///
/// The loader writes one statement at a time, so a single connection is
/// normally all it needs; `max_connections` is configurable for callers that
/// share the pool.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, DbError> {
    if database_url.trim().is_empty() {
        return Err(DbError::ConnectionConfigError(
            "a database URL must be provided (--db-uri or DB_URI)".to_string(),
        ));
    }

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Counts the migrations in `migrations_dir` that have not been applied to the database.
///
/// This never applies anything. A database that has never been migrated has
/// every up-migration pending.
pub async fn pending_migrations(pool: &PgPool, migrations_dir: &Path) -> Result<usize, DbError> {
    let migrator = Migrator::new(migrations_dir).await?;

    let has_history: bool =
        sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await?;

    let applied: HashSet<i64> = if has_history {
        let mut conn = pool.acquire().await?;
        conn.list_applied_migrations()
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect()
    } else {
        HashSet::new()
    };

    let pending = migrator
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !applied.contains(&m.version))
        .count();

    tracing::debug!(
        dir = %migrations_dir.display(),
        applied = applied.len(),
        pending,
        "Checked migration status."
    );

    Ok(pending)
}
