use std::fmt;

/// A scalar value bound to a single column of a table record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Text(String),
    Boolean(bool),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "NULL"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

/// A normalized field read from a CSV source.
///
/// Empty source text never becomes a `Field`; the field is simply absent from the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Integer(i64),
    Text(String),
}

impl Field {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Field::Integer(i) => Some(*i),
            Field::Text(_) => None,
        }
    }

    /// Renders the field as text, whatever it was coerced to on read.
    pub fn to_text(&self) -> String {
        match self {
            Field::Integer(i) => i.to_string(),
            Field::Text(s) => s.clone(),
        }
    }
}

impl From<Field> for Value {
    fn from(field: Field) -> Self {
        match field {
            Field::Integer(i) => Value::Integer(i),
            Field::Text(s) => Value::Text(s),
        }
    }
}

impl From<&Field> for Value {
    fn from(field: &Field) -> Self {
        field.clone().into()
    }
}
