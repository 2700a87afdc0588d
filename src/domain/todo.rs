use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::TodoError;

/// Positive, store-allocated identifier. Never reused after deletion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl TodoId {
    /// Parses a path segment. Anything that is not a positive integer yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.parse::<u64>() {
            Ok(0) | Err(_) => None,
            Ok(n) => Some(Self(n)),
        }
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/todos`. The title stays optional here so a missing
/// field surfaces as a validation failure rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub title: Option<String>,
}

impl CreateTodo {
    pub fn titled(title: impl Into<String>) -> Self { Self { title: Some(title.into()) } }
}

/// Fields a full update may touch. Absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

pub const TITLE_REQUIRED: &str = "Title is required";

/// Returns the trimmed title, or a validation error when nothing is left.
pub fn validate_title(title: Option<&str>) -> Result<String, TodoError> {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(TodoError::Validation(TITLE_REQUIRED.into())),
    }
}
