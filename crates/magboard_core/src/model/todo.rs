//! Todo and study-session model.
//!
//! # Responsibility
//! - Define todos grouped into named lists and their append-only session
//!   records.
//!
//! # Invariants
//! - A todo belongs to exactly one list (`DEFAULT_LIST_ID` when unstated).
//! - At most one todo across all lists carries `is_active_goal == true`;
//!   the todos reducer enforces this.
//! - `total_time_studied` equals the sum of `sessions[*].duration`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::link::epoch_ms_now;

/// List todos land in when no list id is given (also the target of the
/// legacy pre-list snapshot migration).
pub const DEFAULT_LIST_ID: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// One timed work interval recorded against a todo. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoSession {
    pub id: String,
    pub todo_id: String,
    /// Epoch milliseconds when the session ended.
    pub session_date: i64,
    /// Seconds of study time.
    pub duration: i64,
    /// Whether the session ran to the configured duration.
    pub completed: bool,
}

impl TodoSession {
    pub fn new(todo_id: impl Into<String>, duration: i64, completed: bool) -> Self {
        Self {
            id: format!("session-{}", Uuid::new_v4()),
            todo_id: todo_id.into(),
            session_date: epoch_ms_now(),
            duration,
            completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    #[serde(default = "default_list_id")]
    pub list_id: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Running sum of session durations, in seconds.
    #[serde(default)]
    pub total_time_studied: i64,
    #[serde(default)]
    pub sessions: Vec<TodoSession>,
    #[serde(default)]
    pub is_active_goal: bool,
    /// Optional URL attached to the todo. `None` serializes as `null` to
    /// match the stored layout.
    #[serde(default)]
    pub link: Option<String>,
}

fn default_list_id() -> String {
    DEFAULT_LIST_ID.to_string()
}

impl Todo {
    pub fn new(list_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: format!("todo-{}", Uuid::new_v4()),
            list_id: list_id.into(),
            description: description.into(),
            completed: false,
            priority: Priority::default(),
            due_date: None,
            total_time_studied: 0,
            sessions: Vec::new(),
            is_active_goal: false,
            link: None,
        }
    }
}
