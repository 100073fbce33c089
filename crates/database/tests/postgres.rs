//! Statement behaviour against a live PostgreSQL.
//!
//! These tests only run when `TEST_DATABASE_URL` is set.

use core_types::Record;
use database::{DbRepository, StatementExecutor, connect, pending_migrations, synthesize};
use sqlx::PgPool;
use std::time::Duration;

async fn test_pool(test_name: &str) -> Option<PgPool> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("skipping {test_name}: TEST_DATABASE_URL not set");
        return None;
    };
    Some(
        connect(&url, 1, Duration::from_secs(5))
            .await
            .expect("failed to connect to TEST_DATABASE_URL"),
    )
}

fn table_name(prefix: &str) -> String {
    format!("{}_{}", prefix, std::process::id())
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM \"{}\"", table))
        .fetch_one(pool)
        .await
        .expect("count rows")
}

#[tokio::test]
async fn upsert_with_single_update_column_is_idempotent() {
    let Some(pool) = test_pool("upsert_with_single_update_column_is_idempotent").await else {
        return;
    };
    let table = table_name("it_species");
    sqlx::query(&format!(
        "CREATE TABLE \"{}\" (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
        table
    ))
    .execute(&pool)
    .await
    .unwrap();
    let repo = DbRepository::new(pool.clone());

    let first = Record::new().with("id", 1).with("name", "Bulbasaur");
    let statement = synthesize(&table, &first, &["id"]).unwrap();
    repo.execute(&statement).await.unwrap();
    repo.execute(&statement).await.unwrap();
    assert_eq!(count(&pool, &table).await, 1);

    let renamed = Record::new().with("id", 1).with("name", "BulbasaurX");
    repo.execute(&synthesize(&table, &renamed, &["id"]).unwrap())
        .await
        .unwrap();

    let (id, name): (i32, String) =
        sqlx::query_as(&format!("SELECT id, name FROM \"{}\"", table))
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!((id, name.as_str()), (1, "BulbasaurX"));

    sqlx::query(&format!("DROP TABLE \"{}\"", table))
        .execute(&pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn upsert_with_composite_key_updates_all_columns() {
    let Some(pool) = test_pool("upsert_with_composite_key_updates_all_columns").await else {
        return;
    };
    let table = table_name("it_species_names");
    sqlx::query(&format!(
        "CREATE TABLE \"{}\" (species_id INTEGER, language_id INTEGER, name TEXT, genus TEXT, \
         PRIMARY KEY (species_id, language_id))",
        table
    ))
    .execute(&pool)
    .await
    .unwrap();
    let repo = DbRepository::new(pool.clone());
    let key = ["species_id", "language_id"];

    for (name, genus) in [("A", "B"), ("C", "D")] {
        let record = Record::new()
            .with("species_id", 1)
            .with("language_id", 9)
            .with("name", name)
            .with("genus", genus);
        repo.execute(&synthesize(&table, &record, &key).unwrap())
            .await
            .unwrap();
    }

    assert_eq!(count(&pool, &table).await, 1);
    let (name, genus): (String, String) =
        sqlx::query_as(&format!("SELECT name, genus FROM \"{}\"", table))
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!((name.as_str(), genus.as_str()), ("C", "D"));

    sqlx::query(&format!("DROP TABLE \"{}\"", table))
        .execute(&pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn plain_insert_never_merges_duplicates() {
    let Some(pool) = test_pool("plain_insert_never_merges_duplicates").await else {
        return;
    };
    let table = table_name("it_move_effects");
    sqlx::query(&format!("CREATE TABLE \"{}\" (id INTEGER PRIMARY KEY)", table))
        .execute(&pool)
        .await
        .unwrap();
    let repo = DbRepository::new(pool.clone());

    let statement = synthesize(&table, &Record::new().with("id", 1), &[]).unwrap();
    repo.execute(&statement).await.unwrap();
    assert!(repo.execute(&statement).await.is_err());
    assert_eq!(count(&pool, &table).await, 1);

    sqlx::query(&format!("DROP TABLE \"{}\"", table))
        .execute(&pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn unapplied_migrations_are_counted() {
    let Some(pool) = test_pool("unapplied_migrations_are_counted").await else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("90000000000001_first.sql"),
        "SELECT 1;",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("90000000000002_second.sql"),
        "SELECT 2;",
    )
    .unwrap();

    let pending = pending_migrations(&pool, dir.path()).await.unwrap();
    assert_eq!(pending, 2);
}
