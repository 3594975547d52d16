//! Derived views over the state tree.
//!
//! # Responsibility
//! - Give rendering and automation layers one place to query cross-slice
//!   facts without duplicating lookup logic.
//!
//! # Invariants
//! - Read-only: selectors borrow, they never mutate.
//! - A missing layout entry at a breakpoint means "renderer should
//!   auto-place", never an error.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::dashboard::{Breakpoint, Dashboard, LayoutEntry};
use crate::model::link::ModuleLink;
use crate::model::todo::Todo;
use crate::store::AppState;

/// All links whose source or target is `module_id`, in stable id order.
pub fn links_for_module<'state>(
    state: &'state AppState,
    module_id: &str,
) -> Vec<&'state ModuleLink> {
    state
        .module_links
        .links
        .values()
        .filter(|link| link.touches(module_id))
        .collect()
}

/// Enabled links only; the subset consumers act on.
pub fn enabled_links_for_module<'state>(
    state: &'state AppState,
    module_id: &str,
) -> Vec<&'state ModuleLink> {
    links_for_module(state, module_id)
        .into_iter()
        .filter(|link| link.metadata.enabled)
        .collect()
}

/// The dashboard owning `module_id`, if any.
pub fn dashboard_of_module<'state>(
    state: &'state AppState,
    module_id: &str,
) -> Option<&'state Dashboard> {
    state
        .dashboards
        .dashboards
        .values()
        .find(|board| board.module(module_id).is_some())
}

/// Registered type of a module instance.
pub fn module_kind<'state>(state: &'state AppState, module_id: &str) -> Option<&'state str> {
    state
        .dashboards
        .dashboards
        .values()
        .find_map(|board| board.module(module_id))
        .map(|module| module.kind.as_str())
}

/// Grid rectangle of `module_id` at one breakpoint, looked up on its owning
/// dashboard. `None` means no position exists there yet.
pub fn layout_entry_at<'state>(
    state: &'state AppState,
    module_id: &str,
    breakpoint: Breakpoint,
) -> Option<&'state LayoutEntry> {
    let board = dashboard_of_module(state, module_id)?;
    board
        .layouts
        .get(&breakpoint)?
        .iter()
        .find(|entry| entry.i == module_id)
}

/// The single todo currently selected as the active goal, if any.
pub fn active_goal(state: &AppState) -> Option<&Todo> {
    state.todo.active_goal()
}

pub fn todos_in_list<'state>(state: &'state AppState, list_id: &str) -> &'state [Todo] {
    state.todo.list(list_id)
}

/// Theme a dashboard renders with: its own, else the global default.
pub fn effective_theme<'state>(state: &'state AppState, dashboard_id: &str) -> &'state str {
    state
        .dashboards
        .get(dashboard_id)
        .and_then(|board| board.theme.as_deref())
        .unwrap_or(&state.global_config.default_theme)
}

/// One selected module's contribution to an external prompt/search payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleContext {
    pub module_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub config: Map<String, Value>,
}

/// Read-only projection of the selected modules' configs, used by external
/// prompt and search flows to build a query payload. Unknown ids are
/// skipped, not errors.
pub fn context_for_selected_modules(state: &AppState, module_ids: &[String]) -> Vec<ModuleContext> {
    module_ids
        .iter()
        .filter_map(|module_id| {
            let kind = module_kind(state, module_id)?.to_string();
            let config = state
                .module_configs
                .get(module_id)
                .map(|config| config.values.clone())
                .unwrap_or_default();
            Some(ModuleContext {
                module_id: module_id.clone(),
                kind,
                config,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        context_for_selected_modules, effective_theme, enabled_links_for_module, links_for_module,
    };
    use crate::model::dashboard::{ModuleInstance, DEFAULT_DASHBOARD_ID};
    use crate::model::link::{LinkPattern, ModuleLink};
    use crate::reducer::dashboards::DashboardAction;
    use crate::reducer::links::LinkAction;
    use crate::store::{reduce, Action, AppState};

    #[test]
    fn link_queries_are_symmetric() {
        let mut state = AppState::default();
        let link = ModuleLink::new("m-1", "m-2", LinkPattern::DataProvider);
        reduce(&mut state, Action::Links(LinkAction::Add { link })).expect("total");
        assert_eq!(links_for_module(&state, "m-1").len(), 1);
        assert_eq!(links_for_module(&state, "m-2").len(), 1);
        assert!(links_for_module(&state, "m-3").is_empty());
    }

    #[test]
    fn disabled_links_drop_out_of_the_enabled_view() {
        let mut state = AppState::default();
        let mut dormant = ModuleLink::new("m-1", "m-2", LinkPattern::DataProvider);
        dormant.metadata.enabled = false;
        reduce(&mut state, Action::Links(LinkAction::Add { link: dormant })).expect("total");
        let live = ModuleLink::new("m-1", "m-3", LinkPattern::ContentSync);
        let live_id = live.id.clone();
        reduce(&mut state, Action::Links(LinkAction::Add { link: live })).expect("total");

        assert_eq!(links_for_module(&state, "m-1").len(), 2);
        let enabled = enabled_links_for_module(&state, "m-1");
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].id, live_id);
    }

    #[test]
    fn effective_theme_falls_back_to_global_default() {
        let mut state = AppState::default();
        assert_eq!(effective_theme(&state, DEFAULT_DASHBOARD_ID), "light");
        reduce(
            &mut state,
            Action::Dashboards(DashboardAction::SetTheme {
                id: DEFAULT_DASHBOARD_ID.to_string(),
                theme: Some("noir".to_string()),
            }),
        )
        .expect("total");
        assert_eq!(effective_theme(&state, DEFAULT_DASHBOARD_ID), "noir");
    }

    #[test]
    fn context_projection_skips_unknown_modules() {
        let mut state = AppState::default();
        reduce(
            &mut state,
            Action::Dashboards(DashboardAction::AddModule {
                dashboard_id: DEFAULT_DASHBOARD_ID.to_string(),
                module: ModuleInstance::with_id("m-2", "quote"),
            }),
        )
        .expect("total");
        let contexts =
            context_for_selected_modules(&state, &["m-2".to_string(), "ghost".to_string()]);
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].kind, "quote");
    }
}
