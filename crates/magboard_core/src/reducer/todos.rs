//! Todos slice: named lists, the single active goal, session accounting.
//!
//! # Responsibility
//! - Group todos by list id and keep per-todo session history consistent.
//!
//! # Invariants
//! - At most one todo across all lists has `is_active_goal == true`.
//! - `CompleteSession` appends exactly one session and grows
//!   `total_time_studied` by exactly that session's duration.
//! - Unknown todo ids are silent no-ops for update/remove/session actions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::model::todo::{Priority, Todo, TodoSession, DEFAULT_LIST_ID};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoState {
    pub todos_by_list: BTreeMap<String, Vec<Todo>>,
}

impl Default for TodoState {
    fn default() -> Self {
        let mut todos_by_list = BTreeMap::new();
        todos_by_list.insert(DEFAULT_LIST_ID.to_string(), Vec::new());
        Self { todos_by_list }
    }
}

impl TodoState {
    pub fn list(&self, list_id: &str) -> &[Todo] {
        self.todos_by_list
            .get(list_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find(&self, todo_id: &str) -> Option<&Todo> {
        self.todos_by_list
            .values()
            .flat_map(|todos| todos.iter())
            .find(|todo| todo.id == todo_id)
    }

    fn find_mut(&mut self, todo_id: &str) -> Option<&mut Todo> {
        self.todos_by_list
            .values_mut()
            .flat_map(|todos| todos.iter_mut())
            .find(|todo| todo.id == todo_id)
    }

    /// The single todo currently being timed, if any.
    pub fn active_goal(&self) -> Option<&Todo> {
        self.todos_by_list
            .values()
            .flat_map(|todos| todos.iter())
            .find(|todo| todo.is_active_goal)
    }

    fn clear_active_goal(&mut self) {
        for todos in self.todos_by_list.values_mut() {
            for todo in todos.iter_mut() {
                todo.is_active_goal = false;
            }
        }
    }
}

/// Partial update applied by [`TodoAction::Update`]. `None` fields are left
/// untouched; the doubled options for `due_date`/`link` distinguish "leave
/// alone" from "clear".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TodoPatch {
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<String>>,
    pub link: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TodoAction {
    /// Appends a todo to `list_id` (created when missing). A generated id
    /// is assigned when `todo.id` is empty. `set_as_active` atomically
    /// claims the global active-goal slot.
    Add { todo: Todo, set_as_active: bool },
    Update { todo_id: String, patch: TodoPatch },
    Remove { todo_id: String },
    /// Claims the global active-goal slot for one todo; no-op on unknown
    /// ids so a stale selection cannot clear a valid one.
    SetActiveGoal { todo_id: String },
    ClearActiveGoal,
    /// Appends one session and bumps `total_time_studied` in the same
    /// action, keeping the running sum consistent.
    CompleteSession {
        todo_id: String,
        duration: i64,
        completed: bool,
    },
}

pub fn reduce(state: &mut TodoState, action: TodoAction) {
    match action {
        TodoAction::Add {
            mut todo,
            set_as_active,
        } => {
            if todo.id.is_empty() {
                todo.id = format!("todo-{}", Uuid::new_v4());
            }
            if set_as_active {
                state.clear_active_goal();
                todo.is_active_goal = true;
            }
            state
                .todos_by_list
                .entry(todo.list_id.clone())
                .or_default()
                .push(todo);
        }
        TodoAction::Update { todo_id, patch } => {
            if let Some(todo) = state.find_mut(&todo_id) {
                if let Some(description) = patch.description {
                    todo.description = description;
                }
                if let Some(completed) = patch.completed {
                    todo.completed = completed;
                }
                if let Some(priority) = patch.priority {
                    todo.priority = priority;
                }
                if let Some(due_date) = patch.due_date {
                    todo.due_date = due_date;
                }
                if let Some(link) = patch.link {
                    todo.link = link;
                }
            }
        }
        TodoAction::Remove { todo_id } => {
            for todos in state.todos_by_list.values_mut() {
                todos.retain(|todo| todo.id != todo_id);
            }
        }
        TodoAction::SetActiveGoal { todo_id } => {
            if state.find(&todo_id).is_some() {
                state.clear_active_goal();
                if let Some(todo) = state.find_mut(&todo_id) {
                    todo.is_active_goal = true;
                }
            }
        }
        TodoAction::ClearActiveGoal => {
            state.clear_active_goal();
        }
        TodoAction::CompleteSession {
            todo_id,
            duration,
            completed,
        } => {
            if let Some(todo) = state.find_mut(&todo_id) {
                let session = TodoSession::new(todo_id, duration, completed);
                todo.total_time_studied += session.duration;
                todo.sessions.push(session);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce, TodoAction, TodoState};
    use crate::model::todo::{Todo, DEFAULT_LIST_ID};

    fn add(state: &mut TodoState, list_id: &str, description: &str, active: bool) -> String {
        let todo = Todo::new(list_id, description);
        let id = todo.id.clone();
        reduce(
            state,
            TodoAction::Add {
                todo,
                set_as_active: active,
            },
        );
        id
    }

    #[test]
    fn at_most_one_active_goal_across_lists() {
        let mut state = TodoState::default();
        let first = add(&mut state, DEFAULT_LIST_ID, "read", true);
        let second = add(&mut state, "study", "write", true);

        let active: Vec<&str> = state
            .todos_by_list
            .values()
            .flatten()
            .filter(|todo| todo.is_active_goal)
            .map(|todo| todo.id.as_str())
            .collect();
        assert_eq!(active, vec![second.as_str()]);

        reduce(&mut state, TodoAction::SetActiveGoal { todo_id: first.clone() });
        assert_eq!(state.active_goal().expect("one active").id, first);
    }

    #[test]
    fn set_active_goal_on_unknown_id_keeps_current_selection() {
        let mut state = TodoState::default();
        let id = add(&mut state, DEFAULT_LIST_ID, "read", true);
        reduce(
            &mut state,
            TodoAction::SetActiveGoal {
                todo_id: "todo-ghost".to_string(),
            },
        );
        assert_eq!(state.active_goal().expect("still active").id, id);
    }

    #[test]
    fn complete_session_appends_and_sums() {
        let mut state = TodoState::default();
        let id = add(&mut state, DEFAULT_LIST_ID, "read", false);
        reduce(
            &mut state,
            TodoAction::CompleteSession {
                todo_id: id.clone(),
                duration: 1500,
                completed: true,
            },
        );
        reduce(
            &mut state,
            TodoAction::CompleteSession {
                todo_id: id.clone(),
                duration: 300,
                completed: false,
            },
        );
        let todo = state.find(&id).expect("todo should exist");
        assert_eq!(todo.total_time_studied, 1800);
        assert_eq!(todo.sessions.len(), 2);
        assert_eq!(todo.sessions[1].duration, 300);
        assert!(!todo.sessions[1].completed);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut state = TodoState::default();
        let id = add(&mut state, DEFAULT_LIST_ID, "read", false);
        reduce(&mut state, TodoAction::Remove { todo_id: id.clone() });
        let after_first = state.clone();
        reduce(&mut state, TodoAction::Remove { todo_id: id });
        assert_eq!(state, after_first);
    }
}
