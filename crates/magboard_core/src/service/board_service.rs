//! Dashboard/module coordination: add flows and cascade deletes.
//!
//! # Responsibility
//! - Add modules with computed placement and type-shaped default configs.
//! - Cascade dashboard and module removal into configs and links.
//!
//! # Invariants
//! - `board-1` is never removed, and its cascade never runs.
//! - Every cascade is one dispatch batch: durable storage only ever sees
//!   the fully-applied result.
//! - Removal paths are idempotent; repeating them is harmless.

use log::{info, warn};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::model::dashboard::{Breakpoint, LayoutEntry, ModuleInstance, DEFAULT_DASHBOARD_ID};
use crate::model::link::{LinkPattern, ModuleLink};
use crate::placement::engine::{fit_image_size, next_free_position, GridGeometry, GridRect, ImageMeta};
use crate::placement::registry::{GridSize, ModuleTypeRegistry};
use crate::reducer::dashboards::DashboardAction;
use crate::reducer::links::LinkAction;
use crate::reducer::module_configs::ModuleConfigAction;
use crate::select::module_kind;
use crate::service::ServiceError;
use crate::store::{Action, Store};

/// Optional placement inputs for [`BoardService::add_module_to_dashboard`].
/// When `x`/`y` are absent the engine picks the next free position per
/// breakpoint; when image metadata and live geometry are present, image
/// modules are sized to their true aspect ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModulePlacement {
    pub x: Option<u32>,
    pub y: Option<u32>,
    pub w: Option<u32>,
    pub h: Option<u32>,
    pub image: Option<ImageMeta>,
    pub geometry: Option<GridGeometry>,
}

/// One entry fed into [`BoardService::populate_content_list`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContentItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub done: bool,
}

/// Coordination facade over the store for board-level flows. Takes the
/// store and registry by explicit injection.
pub struct BoardService<'a> {
    store: &'a mut Store,
    registry: &'a ModuleTypeRegistry,
}

impl<'a> BoardService<'a> {
    pub fn new(store: &'a mut Store, registry: &'a ModuleTypeRegistry) -> Self {
        Self { store, registry }
    }

    /// Creates a board with a generated `board-N` id and returns the id.
    pub fn create_dashboard(&mut self, name: impl Into<String>) -> Result<String, ServiceError> {
        let id = self.store.state().dashboards.next_board_id();
        self.store.dispatch(Action::Dashboards(DashboardAction::Add {
            id: Some(id.clone()),
            name: name.into(),
        }))?;
        Ok(id)
    }

    /// Adds a module of `kind` to a dashboard: generated instance id,
    /// per-breakpoint placement, type-shaped default config, one atomic
    /// batch. Returns the new module id.
    pub fn add_module_to_dashboard(
        &mut self,
        dashboard_id: &str,
        kind: &str,
        placement: ModulePlacement,
        initial_config: Option<Map<String, Value>>,
    ) -> Result<String, ServiceError> {
        let state = self.store.state();
        let Some(board) = state.dashboards.get(dashboard_id) else {
            return Err(ServiceError::DashboardNotFound(dashboard_id.to_string()));
        };

        let module = ModuleInstance::new(kind);
        let module_id = module.id.clone();
        let spec = self.registry.spec(kind);

        let requested = GridSize::new(
            placement.w.unwrap_or(spec.default.w),
            placement.h.unwrap_or(spec.default.h),
        );
        let mut size = spec.clamp(requested);
        if kind == "image" && placement.w.is_none() && placement.h.is_none() {
            if let Some(meta) = placement.image {
                size = fit_image_size(&spec, &meta, placement.geometry.as_ref());
            }
        }

        let mut batch = vec![Action::Dashboards(DashboardAction::AddModule {
            dashboard_id: dashboard_id.to_string(),
            module,
        })];

        for breakpoint in Breakpoint::ALL {
            let cols = breakpoint.column_count();
            let mut entries = board
                .layouts
                .get(&breakpoint)
                .cloned()
                .unwrap_or_default();
            let rect = match (placement.x, placement.y) {
                // Explicit positions shift left at narrow breakpoints so the
                // entry stays inside the column count.
                (Some(x), Some(y)) => {
                    let w = size.w.min(cols);
                    GridRect::new(x.min(cols.saturating_sub(w)), y, w, size.h)
                }
                _ => {
                    let occupied: Vec<GridRect> = entries
                        .iter()
                        .map(|entry| GridRect::new(entry.x, entry.y, entry.w, entry.h))
                        .collect();
                    next_free_position(&occupied, size, cols)
                }
            };
            let mut entry = LayoutEntry::new(module_id.clone(), rect.x, rect.y, rect.w, rect.h);
            entry.min_w = Some(spec.min.w.min(cols));
            entry.min_h = Some(spec.min.h);
            entry.max_w = Some(spec.max.w.min(cols));
            entry.max_h = Some(spec.max.h);
            entries.push(entry);
            batch.push(Action::Dashboards(DashboardAction::SetLayout {
                dashboard_id: dashboard_id.to_string(),
                breakpoint,
                entries,
            }));
        }

        let config = self.shape_initial_config(kind, initial_config.unwrap_or_default());
        batch.push(Action::ModuleConfigs(ModuleConfigAction::Set {
            module_id: module_id.clone(),
            config,
        }));

        self.store.dispatch_all(batch)?;
        info!(
            "event=module_add module=service status=ok dashboard={dashboard_id} kind={kind} module={module_id}"
        );
        Ok(module_id)
    }

    /// Type-specific default config shaping: todo modules get a generated
    /// list id and a numbered list name, ai-output modules start with an
    /// empty item list.
    fn shape_initial_config(
        &self,
        kind: &str,
        mut config: Map<String, Value>,
    ) -> Map<String, Value> {
        match kind {
            "todo" => {
                if !config.contains_key("listId") {
                    config.insert(
                        "listId".to_string(),
                        Value::String(format!("list-{}", Uuid::new_v4())),
                    );
                }
                if !config.contains_key("listName") {
                    let existing = self
                        .store
                        .state()
                        .dashboards
                        .dashboards
                        .values()
                        .flat_map(|board| board.modules.iter())
                        .filter(|module| module.kind == "todo")
                        .count();
                    config.insert(
                        "listName".to_string(),
                        Value::String(format!("Todo List {}", existing + 1)),
                    );
                }
            }
            "ai-output" => {
                config.entry("items".to_string()).or_insert_with(|| json!([]));
            }
            _ => {}
        }
        config
    }

    /// Cascade-removes a dashboard: its modules' configs, every link
    /// touching those modules, then the board itself, as one batch. The
    /// permanent board and unknown ids are silent no-ops.
    pub fn remove_dashboard(&mut self, dashboard_id: &str) -> Result<(), ServiceError> {
        if dashboard_id == DEFAULT_DASHBOARD_ID {
            return Ok(());
        }
        let Some(board) = self.store.state().dashboards.get(dashboard_id) else {
            return Ok(());
        };

        let module_ids = board.module_ids();
        let module_id_set: BTreeSet<String> = module_ids.iter().cloned().collect();
        self.store.dispatch_all(vec![
            Action::ModuleConfigs(ModuleConfigAction::RemoveMany {
                module_ids: module_ids.clone(),
            }),
            Action::Links(LinkAction::RemoveForModules {
                module_ids: module_id_set,
            }),
            Action::Dashboards(DashboardAction::Remove {
                id: dashboard_id.to_string(),
            }),
        ])?;
        info!(
            "event=dashboard_remove module=service status=ok dashboard={dashboard_id} modules={}",
            module_ids.len()
        );
        Ok(())
    }

    /// Removes one module plus its config and every link touching it.
    /// Idempotent; unknown ids are silent no-ops.
    pub fn remove_module(
        &mut self,
        dashboard_id: &str,
        module_id: &str,
    ) -> Result<(), ServiceError> {
        let mut module_ids = BTreeSet::new();
        module_ids.insert(module_id.to_string());
        self.store.dispatch_all(vec![
            Action::Dashboards(DashboardAction::RemoveModule {
                dashboard_id: dashboard_id.to_string(),
                module_id: module_id.to_string(),
            }),
            Action::ModuleConfigs(ModuleConfigAction::Remove {
                module_id: module_id.to_string(),
            }),
            Action::Links(LinkAction::RemoveForModules { module_ids }),
        ])?;
        Ok(())
    }

    /// Merges AI- or search-produced content into a module's config:
    /// appends items to the existing list and overwrites the title when
    /// given. Missing modules degrade to a logged no-op.
    pub fn populate_content_list(
        &mut self,
        module_id: &str,
        items: Vec<ContentItem>,
        title: Option<String>,
    ) -> Result<(), ServiceError> {
        if module_kind(self.store.state(), module_id).is_none() {
            warn!(
                "event=content_populate module=service status=error error_code=unknown_module module={module_id}"
            );
            return Ok(());
        }

        let mut merged: Vec<Value> = self
            .store
            .state()
            .module_configs
            .get(module_id)
            .and_then(|config| config.get("items"))
            .and_then(|value| value.as_array().cloned())
            .unwrap_or_default();
        for item in &items {
            merged.push(serde_json::to_value(item).unwrap_or(Value::Null));
        }

        let mut patch = Map::new();
        patch.insert("items".to_string(), Value::Array(merged));
        if let Some(title) = title {
            patch.insert("title".to_string(), Value::String(title));
        }

        let action = if self.store.state().module_configs.get(module_id).is_some() {
            ModuleConfigAction::Update {
                module_id: module_id.to_string(),
                patch,
            }
        } else {
            ModuleConfigAction::Set {
                module_id: module_id.to_string(),
                config: patch,
            }
        };
        self.store.dispatch(Action::ModuleConfigs(action))?;
        Ok(())
    }

    /// Creates an enabled link between two modules and returns its id.
    pub fn add_link(
        &mut self,
        source_module_id: &str,
        target_module_id: &str,
        pattern: LinkPattern,
        label: Option<String>,
    ) -> Result<String, ServiceError> {
        let mut link = ModuleLink::new(source_module_id, target_module_id, pattern);
        link.metadata.label = label;
        let link_id = link.id.clone();
        self.store.dispatch(Action::Links(LinkAction::Add { link }))?;
        Ok(link_id)
    }

    pub fn remove_link(&mut self, link_id: &str) -> Result<(), ServiceError> {
        self.store.dispatch(Action::Links(LinkAction::Remove {
            link_id: link_id.to_string(),
        }))?;
        Ok(())
    }

    pub fn set_link_enabled(
        &mut self,
        link_id: &str,
        enabled: bool,
    ) -> Result<(), ServiceError> {
        self.store.dispatch(Action::Links(LinkAction::SetEnabled {
            link_id: link_id.to_string(),
            enabled,
        }))?;
        Ok(())
    }

    pub fn set_link_label(
        &mut self,
        link_id: &str,
        label: Option<String>,
    ) -> Result<(), ServiceError> {
        self.store.dispatch(Action::Links(LinkAction::SetLabel {
            link_id: link_id.to_string(),
            label,
        }))?;
        Ok(())
    }

    /// Merges free-form annotation keys over the link's metadata bag.
    pub fn update_link_metadata(
        &mut self,
        link_id: &str,
        patch: Map<String, Value>,
    ) -> Result<(), ServiceError> {
        self.store.dispatch(Action::Links(LinkAction::UpdateMetadata {
            link_id: link_id.to_string(),
            patch,
        }))?;
        Ok(())
    }
}
