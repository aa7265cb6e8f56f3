use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::field::FieldKind;

/// Why a supplied field value was rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IssueKind {
    WrongKind { expected: FieldKind },
    TooShort { min: usize },
    NotAllowed { allowed: Vec<String> },
    Duplicate,
    Immutable,
    NoChanges,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::WrongKind { expected } => write!(f, "must be a valid {expected}"),
            IssueKind::TooShort { min } => write!(f, "must be at least {min} characters"),
            IssueKind::NotAllowed { allowed } => write!(f, "must be one of {}", allowed.join(", ")),
            IssueKind::Duplicate => f.write_str("already exists"),
            IssueKind::Immutable => f.write_str("cannot be changed"),
            IssueKind::NoChanges => f.write_str("no fields to update"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    #[serde(flatten)]
    pub issue: IssueKind,
}

/// Input rejected before it reached the collection.
///
/// `missing_fields` lists required fields that were absent or empty;
/// `invalid_fields` lists fields whose value broke a constraint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Error)]
#[error("{}", self.describe())]
pub struct ValidationError {
    pub missing_fields: Vec<String>,
    pub invalid_fields: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing(&mut self, field: impl Into<String>) {
        self.missing_fields.push(field.into());
    }

    pub fn invalid(&mut self, field: impl Into<String>, issue: IssueKind) {
        self.invalid_fields.push(FieldIssue { field: field.into(), issue });
    }

    pub fn is_empty(&self) -> bool {
        self.missing_fields.is_empty() && self.invalid_fields.is_empty()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.missing_fields.is_empty() {
            parts.push(format!("missing required fields: {}", self.missing_fields.join(", ")));
        }
        for issue in &self.invalid_fields {
            parts.push(format!("{} {}", issue.field, issue.issue));
        }
        if parts.is_empty() {
            return "validation failed".into();
        }
        parts.join("; ")
    }
}
