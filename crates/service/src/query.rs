//! List queries: exact-match filters plus optional pagination.

use models::Record;
use serde_json::Value;

use crate::pagination::Pagination;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListQuery {
    pub pagination: Option<Pagination>,
    pub filters: Vec<(String, Value)>,
}

impl ListQuery {
    /// Every record, unpaginated.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: Value) -> Self {
        self.filters.push((field.into(), value));
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.filters
            .iter()
            .all(|(field, expected)| record.get(field).map(|actual| loosely_equal(actual, expected)).unwrap_or(false))
    }
}

/// Equality used by filters: numbers compare by value, strings compare
/// against the textual form of numbers and booleans, and an array field
/// matches when any element does.
pub fn loosely_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::String(s), Value::Number(n)) | (Value::Number(n), Value::String(s)) => {
            s.trim().parse::<f64>().ok() == n.as_f64()
        }
        (Value::String(s), Value::Bool(b)) | (Value::Bool(b), Value::String(s)) => s == &b.to_string(),
        (Value::Array(items), e) if !e.is_array() => items.iter().any(|item| loosely_equal(item, e)),
        (a, b) => a == b,
    }
}

/// Turn a raw query-string value into the JSON value it most likely names.
pub fn coerce_query_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    Value::String(raw.to_string())
}
