//! State snapshot save/load with defaulting merge.
//!
//! # Responsibility
//! - Serialize the full state tree under the single durable key.
//! - Rehydrate saved blobs over freshly-constructed defaults so fields
//!   added after a user's last save are backfilled instead of missing.
//!
//! # Invariants
//! - Migration is purely additive/defaulting; no destructive transforms and
//!   no version negotiation.
//! - Corrupt or partial blobs never error out of `load_state`; the broken
//!   slice falls back to its default and the failure is logged.

use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use crate::model::todo::{Todo, DEFAULT_LIST_ID};
use crate::persist::{PersistResult, StatePersister};
use crate::reducer::dashboards::DashboardsState;
use crate::reducer::global::GlobalConfigState;
use crate::reducer::links::LinksState;
use crate::reducer::module_configs::ModuleConfigsState;
use crate::reducer::timers::TimersState;
use crate::reducer::todos::TodoState;
use crate::store::AppState;

/// The one durable key the whole state tree lives under.
pub const STATE_KEY: &str = "dashboard-state";

/// Serializes and writes the complete state tree.
pub fn save_state(conn: &Connection, state: &AppState) -> PersistResult<()> {
    let blob = serde_json::to_string(state)?;
    conn.execute(
        "INSERT INTO app_state (key, value, updated_at)
         VALUES (?1, ?2, strftime('%s', 'now') * 1000)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at;",
        params![STATE_KEY, blob],
    )?;
    Ok(())
}

/// Reads and rehydrates the saved state tree.
///
/// Returns `Ok(None)` when nothing was saved yet or the blob does not
/// parse; callers then fall back to built-in defaults.
pub fn load_state(conn: &Connection) -> PersistResult<Option<AppState>> {
    let blob: Option<String> = conn
        .query_row(
            "SELECT value FROM app_state WHERE key = ?1;",
            [STATE_KEY],
            |row| row.get(0),
        )
        .optional()?;

    let Some(blob) = blob else {
        info!("event=state_load module=persist status=ok outcome=empty");
        return Ok(None);
    };

    match serde_json::from_str::<Value>(&blob) {
        Ok(saved) => {
            let state = merge_with_defaults(saved);
            info!("event=state_load module=persist status=ok outcome=restored");
            Ok(Some(state))
        }
        Err(err) => {
            warn!("event=state_load module=persist status=error error_code=corrupt_blob error={err}");
            Ok(None)
        }
    }
}

/// Default-then-override merge of a saved blob over fresh defaults.
fn merge_with_defaults(saved: Value) -> AppState {
    let mut state = AppState::default();
    let Value::Object(mut slices) = saved else {
        warn!("event=state_load module=persist status=error error_code=not_an_object");
        return state;
    };

    if let Some(fragment) = slices.remove("dashboards") {
        merge_dashboards(&mut state.dashboards, fragment);
    }
    if let Some(fragment) = slices.remove("globalConfig") {
        state.global_config =
            parse_slice::<GlobalConfigState>("globalConfig", fragment).unwrap_or_default();
    }
    if let Some(fragment) = slices.remove("moduleConfigs") {
        state.module_configs =
            parse_slice::<ModuleConfigsState>("moduleConfigs", fragment).unwrap_or_default();
    }
    // Absent in pre-link saves; defaults to empty.
    if let Some(fragment) = slices.remove("moduleLinks") {
        state.module_links = parse_slice::<LinksState>("moduleLinks", fragment).unwrap_or_default();
    }
    if let Some(fragment) = slices.remove("todo") {
        state.todo = migrate_todo_slice(fragment);
    }
    if let Some(fragment) = slices.remove("timer") {
        if let Some(timers) = parse_slice::<TimersState>("timer", fragment) {
            if !timers.timers.is_empty() {
                state.timer = timers;
            }
        }
    }

    state
}

fn parse_slice<T: serde::de::DeserializeOwned>(name: &str, fragment: Value) -> Option<T> {
    match serde_json::from_value(fragment) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(
                "event=state_load module=persist status=error error_code=bad_slice slice={name} error={err}"
            );
            None
        }
    }
}

/// Key-by-key merge of the saved board map over the default map, so the
/// seeded permanent board survives partial blobs. The saved active id is
/// kept only when it resolves in the merged map.
fn merge_dashboards(defaults: &mut DashboardsState, fragment: Value) {
    let Some(saved) = parse_slice::<DashboardsState>("dashboards", fragment) else {
        return;
    };
    for (id, board) in saved.dashboards {
        defaults.dashboards.insert(id, board);
    }
    if let Some(active) = saved.active_dashboard_id {
        if defaults.dashboards.contains_key(&active) {
            defaults.active_dashboard_id = Some(active);
        }
    }
}

/// Rehydrates the todo slice, handling both layouts: the current grouped
/// `todosByList` map and the legacy flat `todos` array from pre-list
/// saves. Every todo is normalized onto its owning list id and gets an
/// explicit `link` (missing fields default through serde).
fn migrate_todo_slice(fragment: Value) -> TodoState {
    let mut state = TodoState::default();
    let Value::Object(mut slice) = fragment else {
        return state;
    };

    if let Some(Value::Object(lists)) = slice.remove("todosByList") {
        for (list_id, todos_value) in lists {
            let todos = parse_todo_array(&list_id, todos_value);
            state.todos_by_list.entry(list_id).or_default().extend(todos);
        }
        return state;
    }

    // Legacy layout: one flat array, list membership per todo (or absent
    // entirely on the oldest saves).
    if let Some(todos_value) = slice.remove("todos") {
        let todos = match todos_value {
            Value::Array(items) => items.into_iter().filter_map(parse_legacy_todo).collect(),
            _ => Vec::new(),
        };
        for todo in todos {
            state
                .todos_by_list
                .entry(todo.list_id.clone())
                .or_default()
                .push(todo);
        }
    }

    state
}

fn parse_todo_array(list_id: &str, value: Value) -> Vec<Todo> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Todo>(item) {
            Ok(mut todo) => {
                // The grouping key wins over whatever the record carries.
                todo.list_id = list_id.to_string();
                Some(todo)
            }
            Err(err) => {
                warn!(
                    "event=state_load module=persist status=error error_code=bad_todo list={list_id} error={err}"
                );
                None
            }
        })
        .collect()
}

fn parse_legacy_todo(item: Value) -> Option<Todo> {
    match serde_json::from_value::<Todo>(item) {
        Ok(todo) => Some(todo),
        Err(err) => {
            warn!(
                "event=state_load module=persist status=error error_code=bad_todo list={DEFAULT_LIST_ID} error={err}"
            );
            None
        }
    }
}

/// SQLite-backed persister injected into the store.
pub struct SqliteStatePersister {
    conn: Connection,
}

impl SqliteStatePersister {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl StatePersister for SqliteStatePersister {
    fn persist(&self, state: &AppState) -> PersistResult<()> {
        save_state(&self.conn, state)
    }
}
