use crate::enums::Value;

/// An ordered set of column/value pairs destined for one table row.
///
/// Column order decides the positional parameter each value is bound to.
/// Column names are unique: setting a column twice replaces the earlier value
/// in place, keeping its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    columns: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `set`.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Builder-style `set` that leaves the column out entirely when `value` is `None`.
    pub fn with_optional(mut self, column: &str, value: Option<Value>) -> Self {
        if let Some(value) = value {
            self.set(column, value);
        }
        self
    }

    pub fn set(&mut self, column: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.columns.iter_mut().find(|(name, _)| name == column) {
            Some((_, existing)) => *existing = value,
            None => self.columns.push((column.to_string(), value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.columns.iter().map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let record = Record::new()
            .with("id", 1)
            .with("identifier", "bulbasaur")
            .with("is_default", true);

        let columns: Vec<_> = record.columns().collect();
        assert_eq!(columns, vec!["id", "identifier", "is_default"]);
    }

    #[test]
    fn setting_existing_column_replaces_in_place() {
        let mut record = Record::new().with("id", 1).with("name", "Bulbasaur");
        record.set("id", 2);

        assert_eq!(record.len(), 2);
        assert_eq!(record.columns().next(), Some("id"));
        assert_eq!(record.get("id"), Some(&Value::Integer(2)));
    }

    #[test]
    fn optional_none_leaves_column_out() {
        let record = Record::new()
            .with("id", 33)
            .with_optional("accuracy", None)
            .with_optional("power", Some(Value::Integer(40)));

        assert!(!record.contains("accuracy"));
        assert_eq!(record.get("power"), Some(&Value::Integer(40)));
    }
}
