//! Dashboards slice: board collection plus active-board selection.
//!
//! # Responsibility
//! - Own the board map and `active_dashboard_id`.
//! - Enforce the permanence of `board-1` and the deterministic
//!   nearest-neighbour reselection rule inside the reducer itself, so the
//!   invariants hold even for callers that bypass the service layer.
//!
//! # Invariants
//! - `DEFAULT_DASHBOARD_ID` always exists and is never removed.
//! - `active_dashboard_id` always resolves to an existing board while the
//!   map is non-empty.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::dashboard::{
    Breakpoint, Dashboard, LayoutEntry, LayoutMap, ModuleInstance, DEFAULT_DASHBOARD_ID,
    DEFAULT_MODULE_ID,
};

static TRAILING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)$").expect("trailing number pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardsState {
    pub dashboards: BTreeMap<String, Dashboard>,
    pub active_dashboard_id: Option<String>,
}

impl Default for DashboardsState {
    /// Seeds the permanent board with one timer module placed at the origin
    /// of every breakpoint.
    fn default() -> Self {
        let mut board = Dashboard::new(DEFAULT_DASHBOARD_ID, "My Board");
        board
            .modules
            .push(ModuleInstance::with_id(DEFAULT_MODULE_ID, "timer"));
        let mut layouts = LayoutMap::new();
        for breakpoint in Breakpoint::ALL {
            let w = 3.min(breakpoint.column_count());
            layouts.insert(breakpoint, vec![LayoutEntry::new(DEFAULT_MODULE_ID, 0, 0, w, 4)]);
        }
        board.layouts = layouts;

        let mut dashboards = BTreeMap::new();
        dashboards.insert(board.id.clone(), board);
        Self {
            dashboards,
            active_dashboard_id: Some(DEFAULT_DASHBOARD_ID.to_string()),
        }
    }
}

impl DashboardsState {
    pub fn get(&self, id: &str) -> Option<&Dashboard> {
        self.dashboards.get(id)
    }

    /// Board ids ordered by trailing numeric suffix: suffixed ids first in
    /// numeric order, then unsuffixed ids, ties broken lexicographically.
    /// This is the ordering the reselection rule uses.
    pub fn ordered_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.dashboards.keys().cloned().collect();
        ids.sort_by_key(|id| {
            let suffix = numeric_suffix(id);
            (suffix.is_none(), suffix, id.clone())
        });
        ids
    }

    /// Next generated board id: one past the highest numeric suffix in use.
    pub fn next_board_id(&self) -> String {
        let max = self
            .dashboards
            .keys()
            .filter_map(|id| numeric_suffix(id))
            .max()
            .unwrap_or(0);
        format!("board-{}", max + 1)
    }
}

fn numeric_suffix(id: &str) -> Option<u64> {
    TRAILING_NUMBER
        .captures(id)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Picks the board the user lands on after `removed_id` disappears: the
/// immediate predecessor in suffix order, else the immediate successor,
/// else the first remaining id, else none.
fn reselect_active(ordered_before: &[String], removed_id: &str) -> Option<String> {
    let index = ordered_before.iter().position(|id| id == removed_id)?;
    if index > 0 {
        return Some(ordered_before[index - 1].clone());
    }
    if index + 1 < ordered_before.len() {
        return Some(ordered_before[index + 1].clone());
    }
    None
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    /// Adds a board; generates a `board-N` id when `id` is `None`.
    Add { id: Option<String>, name: String },
    Rename { id: String, name: String },
    SetTheme { id: String, theme: Option<String> },
    SetActive { id: String },
    /// Removes a board. Silent no-op for `board-1` and for unknown ids.
    Remove { id: String },
    AddModule {
        dashboard_id: String,
        module: ModuleInstance,
    },
    RemoveModule {
        dashboard_id: String,
        module_id: String,
    },
    /// Replaces one breakpoint's layout array. Sole writer is the grid
    /// renderer's layout-change callback (or the add-module flow).
    SetLayout {
        dashboard_id: String,
        breakpoint: Breakpoint,
        entries: Vec<LayoutEntry>,
    },
}

pub fn reduce(state: &mut DashboardsState, action: DashboardAction) {
    match action {
        DashboardAction::Add { id, name } => {
            let id = id.unwrap_or_else(|| state.next_board_id());
            if state.dashboards.contains_key(&id) {
                return;
            }
            state.dashboards.insert(id.clone(), Dashboard::new(id.clone(), name));
            if state.active_dashboard_id.is_none() {
                state.active_dashboard_id = Some(id);
            }
        }
        DashboardAction::Rename { id, name } => {
            if let Some(board) = state.dashboards.get_mut(&id) {
                board.name = name;
            }
        }
        DashboardAction::SetTheme { id, theme } => {
            if let Some(board) = state.dashboards.get_mut(&id) {
                board.theme = theme;
            }
        }
        DashboardAction::SetActive { id } => {
            if state.dashboards.contains_key(&id) {
                state.active_dashboard_id = Some(id);
            }
        }
        DashboardAction::Remove { id } => {
            if id == DEFAULT_DASHBOARD_ID || !state.dashboards.contains_key(&id) {
                return;
            }
            let ordered_before = state.ordered_ids();
            state.dashboards.remove(&id);
            if state.active_dashboard_id.as_deref() == Some(id.as_str()) {
                state.active_dashboard_id = reselect_active(&ordered_before, &id)
                    .or_else(|| state.ordered_ids().first().cloned());
            }
        }
        DashboardAction::AddModule {
            dashboard_id,
            module,
        } => {
            if let Some(board) = state.dashboards.get_mut(&dashboard_id) {
                if board.module(&module.id).is_none() {
                    board.modules.push(module);
                }
            }
        }
        DashboardAction::RemoveModule {
            dashboard_id,
            module_id,
        } => {
            if let Some(board) = state.dashboards.get_mut(&dashboard_id) {
                board.modules.retain(|module| module.id != module_id);
                for entries in board.layouts.values_mut() {
                    entries.retain(|entry| entry.i != module_id);
                }
            }
        }
        DashboardAction::SetLayout {
            dashboard_id,
            breakpoint,
            entries,
        } => {
            if let Some(board) = state.dashboards.get_mut(&dashboard_id) {
                board.layouts.insert(breakpoint, entries);
            }
        }
    }
}
