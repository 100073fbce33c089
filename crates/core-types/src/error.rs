use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Record for table '{table}' has no columns")]
    EmptyRecord { table: String },

    #[error("Source row is missing required field '{column}'")]
    MissingField { column: String },
}
