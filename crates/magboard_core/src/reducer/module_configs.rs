//! Module-config slice: one opaque config bag per module instance.
//!
//! # Responsibility
//! - Keep configs keyed independently from the dashboard tree so cascade
//!   deletion can garbage-collect them by module id alone.
//!
//! # Invariants
//! - `Set` replaces the whole bag (locked resets unless provided);
//!   `Update` merges keys and leaves `locked` alone unless patched.
//! - Unknown module ids are silent no-ops for update/remove.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::model::config::ModuleConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfigsState {
    pub configs: BTreeMap<String, ModuleConfig>,
}

impl ModuleConfigsState {
    pub fn get(&self, module_id: &str) -> Option<&ModuleConfig> {
        self.configs.get(module_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModuleConfigAction {
    /// Replaces the module's config with a fresh bag (`locked: false`
    /// unless the bag carries a `locked` key).
    Set {
        module_id: String,
        config: Map<String, Value>,
    },
    /// Merges the patch over the existing bag; no-op when absent.
    Update {
        module_id: String,
        patch: Map<String, Value>,
    },
    SetLocked { module_id: String, locked: bool },
    Remove { module_id: String },
    RemoveMany { module_ids: Vec<String> },
}

pub fn reduce(state: &mut ModuleConfigsState, action: ModuleConfigAction) {
    match action {
        ModuleConfigAction::Set { module_id, config } => {
            let mut fresh = ModuleConfig::default();
            fresh.merge(config);
            state.configs.insert(module_id, fresh);
        }
        ModuleConfigAction::Update { module_id, patch } => {
            if let Some(config) = state.configs.get_mut(&module_id) {
                config.merge(patch);
            }
        }
        ModuleConfigAction::SetLocked { module_id, locked } => {
            if let Some(config) = state.configs.get_mut(&module_id) {
                config.locked = locked;
            }
        }
        ModuleConfigAction::Remove { module_id } => {
            state.configs.remove(&module_id);
        }
        ModuleConfigAction::RemoveMany { module_ids } => {
            for module_id in module_ids {
                state.configs.remove(&module_id);
            }
        }
    }
}
