use crate::enums::{Field, Value};
use crate::error::CoreError;
use std::collections::HashMap;

/// Coerces one raw CSV field.
///
/// Empty text is absent (`None`), text that parses fully as a signed base-10
/// `i64` becomes an integer, and everything else stays text.
pub fn normalize_field(raw: &str) -> Option<Field> {
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<i64>() {
        Ok(i) => Some(Field::Integer(i)),
        Err(_) => Some(Field::Text(raw.to_string())),
    }
}

/// One normalized data row of a CSV source, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    fields: HashMap<String, Field>,
}

impl SourceRow {
    /// Builds a row from parallel header/raw-value iterators, dropping empty fields.
    pub fn from_raw<'a>(
        headers: impl IntoIterator<Item = &'a str>,
        raw: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let fields = headers
            .into_iter()
            .zip(raw)
            .filter_map(|(header, value)| {
                normalize_field(value).map(|field| (header.to_string(), field))
            })
            .collect();
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Field::as_integer)
    }

    /// The field as a value, or `MissingField` if the source left it out.
    pub fn require(&self, key: &str) -> Result<Value, CoreError> {
        self.get(key)
            .map(Value::from)
            .ok_or_else(|| CoreError::MissingField {
                column: key.to_string(),
            })
    }

    pub fn optional(&self, key: &str) -> Option<Value> {
        self.get(key).map(Value::from)
    }

    /// Flag coercion: missing is false, otherwise non-zero integer or non-empty text.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Field::Integer(i)) => *i != 0,
            Some(Field::Text(s)) => !s.is_empty(),
            None => false,
        }
    }

    /// Missing is `Null`; anything present is forced back to text.
    pub fn text_or_null(&self, key: &str) -> Value {
        match self.get(key) {
            Some(field) => Value::Text(field.to_text()),
            None => Value::Null,
        }
    }
}
