//! Field specifications: the per-resource constraint table consumed by the
//! validator and by the store's create path (trimming, defaults, uniqueness).

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
    StringArray,
    Email,
    /// RFC 3339 string or epoch milliseconds.
    Timestamp,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::StringArray => "list of strings",
            FieldKind::Email => "email address",
            FieldKind::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldDefault {
    Value(Value),
    /// Creation time as an RFC 3339 string.
    Now,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldRule {
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub allowed: Option<Vec<String>>,
    pub unique: bool,
    pub trim: bool,
    pub default: Option<FieldDefault>,
}

impl FieldRule {
    pub fn new(kind: FieldKind) -> Self {
        Self { kind, required: false, min_length: None, allowed: None, unique: false, trim: false, default: None }
    }

    pub fn string() -> Self { Self::new(FieldKind::String) }
    pub fn number() -> Self { Self::new(FieldKind::Number) }
    pub fn integer() -> Self { Self::new(FieldKind::Integer) }
    pub fn boolean() -> Self { Self::new(FieldKind::Boolean) }
    pub fn string_array() -> Self { Self::new(FieldKind::StringArray) }
    pub fn email() -> Self { Self::new(FieldKind::Email) }
    pub fn timestamp() -> Self { Self::new(FieldKind::Timestamp) }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn one_of(mut self, allowed: &[&str]) -> Self {
        self.allowed = Some(allowed.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(FieldDefault::Value(value));
        self
    }

    pub fn default_now(mut self) -> Self {
        self.default = Some(FieldDefault::Now);
        self
    }
}

/// Ordered table of field name to rule.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSpec {
    fields: Vec<(String, FieldRule)>,
}

impl FieldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the rule for `name`.
    pub fn field(mut self, name: &str, rule: FieldRule) -> Self {
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| n == name) {
            slot.1 = rule;
        } else {
            self.fields.push((name.to_string(), rule));
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(n, r)| (n.as_str(), r))
    }

    pub fn unique_fields(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, r)| r.unique).map(|(n, _)| n)
    }

    /// Trim string values of `trim` fields in place.
    pub fn normalize(&self, input: &mut Map<String, Value>) {
        for name in self.iter().filter(|(_, r)| r.trim).map(|(n, _)| n) {
            if let Some(Value::String(s)) = input.get_mut(name) {
                let trimmed = s.trim();
                if trimmed.len() != s.len() {
                    *s = trimmed.to_string();
                }
            }
        }
    }

    /// Fill absent (or null) fields that declare a default.
    pub fn apply_defaults(&self, input: &mut Map<String, Value>, now: DateTime<Utc>) {
        for (name, rule) in self.iter() {
            let Some(default) = &rule.default else { continue };
            let absent = matches!(input.get(name), None | Some(Value::Null));
            if absent {
                let value = match default {
                    FieldDefault::Value(v) => v.clone(),
                    FieldDefault::Now => Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
                };
                input.insert(name.to_string(), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn field_replaces_existing_rule() {
        let spec = FieldSpec::new()
            .field("title", FieldRule::string())
            .field("title", FieldRule::string().required());
        assert_eq!(spec.iter().count(), 1);
        assert!(spec.get("title").unwrap().required);
    }

    #[test]
    fn defaults_fill_absent_and_null_only() {
        let spec = FieldSpec::new()
            .field("status", FieldRule::string().default_value(json!("Active")))
            .field("createdAt", FieldRule::timestamp().default_now())
            .field("ratings", FieldRule::number().default_value(json!(1.0)));
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let mut input = json!({"ratings": 4.5, "status": null}).as_object().unwrap().clone();
        spec.apply_defaults(&mut input, now);
        assert_eq!(input["status"], "Active");
        assert_eq!(input["ratings"], 4.5);
        assert_eq!(input["createdAt"], "2025-01-02T03:04:05.000Z");
    }

    #[test]
    fn normalize_trims_only_marked_fields() {
        let spec = FieldSpec::new()
            .field("name", FieldRule::string().trim())
            .field("description", FieldRule::string());
        let mut input = json!({"name": "  Dune ", "description": " long "}).as_object().unwrap().clone();
        spec.normalize(&mut input);
        assert_eq!(input["name"], "Dune");
        assert_eq!(input["description"], " long ");
    }

    #[test]
    fn unique_fields_listed() {
        let spec = FieldSpec::new()
            .field("email", FieldRule::email().unique())
            .field("name", FieldRule::string());
        assert_eq!(spec.unique_fields().collect::<Vec<_>>(), vec!["email"]);
    }
}
