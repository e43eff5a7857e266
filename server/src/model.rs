//! The `Todo` entity and the request payload that creates or replaces one.
//!
//! # Design
//! `Todo` is both the stored row (`sqlx::FromRow`, snake_case columns) and the
//! wire object (camelCase JSON). `TodoInput` is deliberately a separate type:
//! it has no `id` or timestamps, so client-supplied values for those fields
//! are dropped during deserialization instead of being filtered later.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single todo row as stored and as returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request body for `POST /api/todos` and `PUT /api/todos/{id}`.
///
/// `title` is required; `description` and `completed` may be omitted or null.
/// Unknown fields (including `id`, `createdAt`, `updatedAt`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TodoInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}
