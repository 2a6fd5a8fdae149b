//! Helpers for building SQL text.

/// Escape a string for embedding in a single-quoted SQL literal.
///
/// Only `'` is doubled. Backslashes and control characters pass through
/// untouched, which matches PostgreSQL's standard-conforming strings.
pub fn escape_sql_literal(s: &str) -> String {
    s.replace('\'', "''")
}

/// Escape and wrap in single quotes
pub fn quote_sql_literal(s: &str) -> String {
    format!("'{}'", escape_sql_literal(s))
}

/// Quote an optional value, rendering `None` as `NULL`
pub fn sql_literal_or_null(value: Option<&str>) -> String {
    match value {
        Some(v) => quote_sql_literal(v),
        None => "NULL".to_string(),
    }
}
