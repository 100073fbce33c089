use crate::error::DbError;
use crate::upsert::Statement;
use async_trait::async_trait;

/// A handle that can execute one parameterized statement at a time.
///
/// The loader is written against this trait so it does not care whether it is
/// talking to PostgreSQL or to an in-memory stand-in. Implementations must not
/// retry: a failed statement is reported to the caller as-is.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Executes `statement` and returns the number of rows it affected.
    async fn execute(&self, statement: &Statement) -> Result<u64, DbError>;
}

#[async_trait]
impl<T: StatementExecutor + ?Sized> StatementExecutor for &T {
    async fn execute(&self, statement: &Statement) -> Result<u64, DbError> {
        (**self).execute(statement).await
    }
}
