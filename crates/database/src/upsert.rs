use core_types::{CoreError, Record, Value};
use std::fmt;

/// A parameterized SQL statement ready to be executed.
///
/// `params[i]` is bound to placeholder `$(i + 1)` in `sql`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Quotes a PostgreSQL identifier, doubling any embedded quote characters.
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

fn quoted_list<'a>(identifiers: impl IntoIterator<Item = &'a str>) -> String {
    identifiers
        .into_iter()
        .map(quote_identifier)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Synthesizes an idempotent write for `record` into `table`.
///
/// The statement always inserts every column of the record, in order. When
/// `primary_key` is non-empty a conflict on those columns updates the non-key
/// columns to the incoming values, or does nothing if every column is part of
/// the key. An empty `primary_key` yields a plain insert, so a duplicate row
/// fails at the database.
pub fn synthesize(
    table: &str,
    record: &Record,
    primary_key: &[&str],
) -> Result<Statement, CoreError> {
    if record.is_empty() {
        return Err(CoreError::EmptyRecord {
            table: table.to_string(),
        });
    }

    let placeholders = (1..=record.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table),
        quoted_list(record.columns()),
        placeholders
    );

    if !primary_key.is_empty() {
        let conflict_target = quoted_list(primary_key.iter().copied());
        let update_columns: Vec<&str> = record
            .columns()
            .filter(|column| !primary_key.contains(column))
            .collect();

        match update_columns.as_slice() {
            [] => {
                sql.push_str(&format!(" ON CONFLICT ({}) DO NOTHING", conflict_target));
            }
            [column] => {
                let column = quote_identifier(column);
                sql.push_str(&format!(
                    " ON CONFLICT ({}) DO UPDATE SET {} = EXCLUDED.{}",
                    conflict_target, column, column
                ));
            }
            columns => {
                // `SET (a) = (EXCLUDED.a)` is not valid without ROW, so only 2+ columns land here.
                let excluded = columns
                    .iter()
                    .map(|column| format!("EXCLUDED.{}", quote_identifier(column)))
                    .collect::<Vec<_>>()
                    .join(", ");
                sql.push_str(&format!(
                    " ON CONFLICT ({}) DO UPDATE SET ({}) = ({})",
                    conflict_target,
                    quoted_list(columns.iter().copied()),
                    excluded
                ));
            }
        }
    }

    Ok(Statement {
        sql,
        params: record.values().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_embedded_quotes() {
        assert_eq!(quote_identifier("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn display_renders_sql_only() {
        let statement = synthesize("types", &Record::new().with("id", 1), &[]).unwrap();
        assert_eq!(statement.to_string(), statement.sql);
    }
}
