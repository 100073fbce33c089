use core_types::CoreError;
use database::DbError;
use thiserror::Error;

/// Problems with the shape of a `LoadPlan`, caught before anything is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Table '{0}' appears more than once in the load plan")]
    DuplicateTable(&'static str),

    #[error("Table '{table}' references '{reference}', which is not loaded before it")]
    ReferenceNotLoaded {
        table: &'static str,
        reference: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read source '{source_name}': {source}")]
    SourceRead {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed record in '{source_name}' at row {row}: {source}")]
    MalformedRecord {
        source_name: String,
        row: usize,
        #[source]
        source: CoreError,
    },

    #[error("Statement for table '{table}' failed ('{source_name}', row {row}): {source}")]
    StatementExecution {
        table: String,
        source_name: String,
        row: usize,
        #[source]
        source: DbError,
    },

    #[error("Database connection error: {0}")]
    Connection(#[from] DbError),

    #[error("{0} outstanding migrations must be applied before loading")]
    PendingMigrations(usize),

    #[error("Invalid load plan: {0}")]
    Plan(#[from] PlanError),

    #[error("Source reader task failed: {0}")]
    Join(String),

    #[error("Progress bar template error: {0}")]
    ProgressBarTemplate(String),
}

impl From<indicatif::style::TemplateError> for LoadError {
    fn from(error: indicatif::style::TemplateError) -> Self {
        LoadError::ProgressBarTemplate(error.to_string())
    }
}
