//! Input validation against a [`FieldSpec`].
//!
//! Both entry points are pure: they inspect the input and return every
//! problem found at once. Fields the [`FieldSpec`] does not name pass through.

use chrono::DateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::errors::{IssueKind, ValidationError};
use crate::field::{FieldKind, FieldRule, FieldSpec};
use crate::record::{Record, RecordId};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("email regex compiles")
});

pub fn is_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Null and the empty string count as "not supplied".
fn is_empty_equivalent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn kind_matches(kind: FieldKind, value: &Value) -> bool {
    match kind {
        FieldKind::String => value.is_string(),
        FieldKind::Number => value.is_number(),
        FieldKind::Integer => match value {
            Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().map(|f| f.fract() == 0.0).unwrap_or(false),
            _ => false,
        },
        FieldKind::Boolean => value.is_boolean(),
        FieldKind::StringArray => value.as_array().map(|items| items.iter().all(Value::is_string)).unwrap_or(false),
        FieldKind::Email => value.as_str().map(is_email).unwrap_or(false),
        FieldKind::Timestamp => match value {
            Value::String(s) => DateTime::parse_from_rfc3339(s).is_ok(),
            Value::Number(n) => n.is_i64() || n.is_u64(),
            _ => false,
        },
    }
}

/// Constraint check for a supplied, non-empty value.
fn check_value(rule: &FieldRule, value: &Value) -> Option<IssueKind> {
    if !kind_matches(rule.kind, value) {
        return Some(IssueKind::WrongKind { expected: rule.kind });
    }
    if let (Some(min), Some(s)) = (rule.min_length, value.as_str()) {
        if s.chars().count() < min {
            return Some(IssueKind::TooShort { min });
        }
    }
    if let (Some(allowed), Some(s)) = (&rule.allowed, value.as_str()) {
        if !allowed.iter().any(|a| a == s) {
            return Some(IssueKind::NotAllowed { allowed: allowed.clone() });
        }
    }
    None
}

/// Validate a full input destined for `create`.
pub fn validate(input: &Map<String, Value>, spec: &FieldSpec) -> Result<(), ValidationError> {
    let mut err = ValidationError::new();
    for (name, rule) in spec.iter() {
        match input.get(name) {
            Some(v) if !is_empty_equivalent(v) => {
                if let Some(issue) = check_value(rule, v) {
                    err.invalid(name, issue);
                }
            }
            _ if rule.required => err.missing(name),
            _ => {}
        }
    }
    err.into_result()
}

/// Validate a partial input destined for `update` of the record `target`.
///
/// Only supplied fields are checked. A supplied required field that is
/// empty is reported missing; an input carrying nothing but `id` is
/// rejected; an `id` naming another record is rejected as immutable.
pub fn validate_partial(input: &Map<String, Value>, spec: &FieldSpec, target: &RecordId) -> Result<(), ValidationError> {
    let mut err = ValidationError::new();

    if let Some(id) = input.get(Record::ID_FIELD) {
        if RecordId::from_value(id).as_ref() != Some(target) {
            err.invalid(Record::ID_FIELD, IssueKind::Immutable);
        }
    }
    if !input.keys().any(|k| k != Record::ID_FIELD) {
        err.invalid("body", IssueKind::NoChanges);
        return Err(err);
    }

    for (name, value) in input {
        let Some(rule) = spec.get(name) else { continue };
        if is_empty_equivalent(value) {
            if rule.required {
                err.missing(name.as_str());
            }
            continue;
        }
        if let Some(issue) = check_value(rule, value) {
            err.invalid(name.as_str(), issue);
        }
    }
    err.into_result()
}
