//! Product records extracted from catalog JSON documents.
//!
//! A catalog file is a JSON array of loosely-shaped objects. Each object
//! becomes exactly one [`ProductRecord`], with fallback names filling in
//! for any missing keys.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Brand used when an object has no `brand` key
pub const DEFAULT_BRAND: &str = "Sin Marca";

/// Product name used when an object has no `name` key
pub const DEFAULT_NAME: &str = "Sin Nombre";

/// Category used when neither `categoria` nor `category` carries a value
pub const DEFAULT_CATEGORY: &str = "Sin Categoria";

/// Category keys, in lookup order
pub const CATEGORY_KEYS: [&str; 2] = ["categoria", "category"];

/// A single product as it will be seeded into the `products` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    pub name: String,
    pub brand: String,
    pub category: String,
    /// Catalog files carry no pricing; always 0.
    pub cost: i64,
}

/// Error type for record extraction
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    /// The array element is not a JSON object
    NotAnObject {
        index: usize,
        found: &'static str,
    },
    /// A present field holds something other than a string
    InvalidField {
        index: usize,
        field: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::NotAnObject { index, found } => {
                write!(f, "element {} is not an object (found {})", index, found)
            }
            RecordError::InvalidField { index, field, found } => write!(
                f,
                "element {}: field '{}' must be a string (found {})",
                index, field, found
            ),
        }
    }
}

impl std::error::Error for RecordError {}

impl ProductRecord {
    /// Build a record from one element of a catalog array.
    ///
    /// `index` is only used to point at the element in error messages.
    pub fn from_json(index: usize, value: &JsonValue) -> Result<Self, RecordError> {
        let object = value.as_object().ok_or(RecordError::NotAnObject {
            index,
            found: json_type_name(value),
        })?;

        let brand = string_or_default(object, index, "brand", DEFAULT_BRAND)?;
        let name = string_or_default(object, index, "name", DEFAULT_NAME)?;
        let category = category_of(object, index)?;

        Ok(Self {
            name,
            brand,
            category,
            cost: 0,
        })
    }
}

/// Value of `key` trimmed, or `default` when the key is absent.
///
/// A key that is present but null or non-string is an error rather than a
/// silent fallback.
fn string_or_default(
    object: &Map<String, JsonValue>,
    index: usize,
    field: &'static str,
    default: &str,
) -> Result<String, RecordError> {
    match object.get(field) {
        None => Ok(default.to_string()),
        Some(JsonValue::String(s)) => Ok(s.trim().to_string()),
        Some(other) => Err(RecordError::InvalidField {
            index,
            field,
            found: json_type_name(other),
        }),
    }
}

/// First truthy value among the category keys, else the default category.
fn category_of(object: &Map<String, JsonValue>, index: usize) -> Result<String, RecordError> {
    for field in CATEGORY_KEYS {
        match object.get(field) {
            Some(value) if is_truthy(value) => {
                return match value {
                    JsonValue::String(s) => Ok(s.trim().to_string()),
                    other => Err(RecordError::InvalidField {
                        index,
                        field,
                        found: json_type_name(other),
                    }),
                };
            }
            _ => continue,
        }
    }
    Ok(DEFAULT_CATEGORY.to_string())
}

/// Loose truthiness: null, false, zero, and empty strings/containers are falsy.
///
/// Whitespace-only strings are truthy, so `"  "` wins over `category` and
/// trims down to an empty category.
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(a) => !a.is_empty(),
        JsonValue::Object(o) => !o.is_empty(),
    }
}

/// Human-readable JSON type name for error messages
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
