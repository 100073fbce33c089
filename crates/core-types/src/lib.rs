pub mod enums;
pub mod error;
pub mod record;
pub mod row;

// Re-export the core types to provide a clean public API.
pub use enums::{Field, Value};
pub use error::CoreError;
pub use record::Record;
pub use row::{SourceRow, normalize_field};
