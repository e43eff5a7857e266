//! Wire types for the `/api/todos` surface.
//!
//! Defined independently of the server crate so that the client never links
//! against axum or sqlx; the integration test catches schema drift.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A todo as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body for create and update requests.
///
/// On create an omitted `completed` means `false`; on update it leaves the
/// stored flag alone. `description` is always sent, so `None` clears it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    pub title: String,
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Error body the server attaches to every non-2xx JSON response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
