//! Links slice: flat collection of inter-module links.
//!
//! # Responsibility
//! - Store links in one flat map so source-side and target-side queries
//!   stay symmetric.
//! - Provide the bulk removal used by cascade deletion.
//!
//! # Invariants
//! - Unknown link ids are silent no-ops for update/remove.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use crate::model::link::ModuleLink;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LinksState {
    pub links: BTreeMap<String, ModuleLink>,
}

impl LinksState {
    pub fn get(&self, link_id: &str) -> Option<&ModuleLink> {
        self.links.get(link_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkAction {
    /// Inserts a link; generates an id when the link carries an empty one.
    Add { link: ModuleLink },
    SetEnabled { link_id: String, enabled: bool },
    SetLabel {
        link_id: String,
        label: Option<String>,
    },
    /// Merges free-form metadata keys over the link's extra bag.
    UpdateMetadata {
        link_id: String,
        patch: Map<String, Value>,
    },
    Remove { link_id: String },
    /// Drops every link whose source or target is in the set. Cascade path.
    RemoveForModules { module_ids: BTreeSet<String> },
}

pub fn reduce(state: &mut LinksState, action: LinkAction) {
    match action {
        LinkAction::Add { mut link } => {
            if link.id.is_empty() {
                link.id = format!("link-{}", Uuid::new_v4());
            }
            state.links.insert(link.id.clone(), link);
        }
        LinkAction::SetEnabled { link_id, enabled } => {
            if let Some(link) = state.links.get_mut(&link_id) {
                link.metadata.enabled = enabled;
            }
        }
        LinkAction::SetLabel { link_id, label } => {
            if let Some(link) = state.links.get_mut(&link_id) {
                link.metadata.label = label;
            }
        }
        LinkAction::UpdateMetadata { link_id, patch } => {
            if let Some(link) = state.links.get_mut(&link_id) {
                for (key, value) in patch {
                    link.metadata.extra.insert(key, value);
                }
            }
        }
        LinkAction::Remove { link_id } => {
            state.links.remove(&link_id);
        }
        LinkAction::RemoveForModules { module_ids } => {
            state.links.retain(|_, link| {
                !module_ids.contains(&link.source_module_id)
                    && !module_ids.contains(&link.target_module_id)
            });
        }
    }
}
