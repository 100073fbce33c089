use crate::error::DbError;
use crate::executor::StatementExecutor;
use crate::upsert::Statement;
use async_trait::async_trait;
use core_types::Value;
use sqlx::postgres::PgPool;

/// The `DbRepository` executes synthesized statements against PostgreSQL.
///
/// It holds the connection pool and binds each `Value` with the matching
/// Rust type. `Null` is bound as a text-typed NULL; record shaping leaves
/// absent numeric fields out of the record rather than nulling them.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatementExecutor for DbRepository {
    async fn execute(&self, statement: &Statement) -> Result<u64, DbError> {
        let mut query = sqlx::query(&statement.sql);
        for value in &statement.params {
            query = match value {
                Value::Integer(i) => query.bind(*i),
                Value::Text(s) => query.bind(s.as_str()),
                Value::Boolean(b) => query.bind(*b),
                Value::Null => query.bind(None::<&str>),
            };
        }

        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
