//! The single owned state container.
//!
//! # Responsibility
//! - Hold the full slice tree and route dispatched actions to the slice
//!   reducers.
//! - Observe every state transition and hand the post-mutation snapshot to
//!   the injected persister.
//!
//! # Invariants
//! - All mutation flows through `dispatch`/`dispatch_all`; no collaborator
//!   mutates a slice directly.
//! - A batch persists once, after every action in it has been applied, so a
//!   persisted snapshot never reflects a half-applied cascade.
//! - Persistence failures never propagate into the dispatch path.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::persist::StatePersister;
use crate::reducer::dashboards::{self, DashboardAction, DashboardsState};
use crate::reducer::global::{self, GlobalConfigAction, GlobalConfigState};
use crate::reducer::links::{self, LinkAction, LinksState};
use crate::reducer::module_configs::{self, ModuleConfigAction, ModuleConfigsState};
use crate::reducer::timers::{self, TimerAction, TimerError, TimersState};
use crate::reducer::todos::{self, TodoAction, TodoState};

/// Complete entity-store tree. Top-level field names match the persisted
/// slice keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub dashboards: DashboardsState,
    pub global_config: GlobalConfigState,
    pub module_configs: ModuleConfigsState,
    pub module_links: LinksState,
    pub todo: TodoState,
    pub timer: TimersState,
}

/// Every mutation the store accepts, tagged by slice.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Dashboards(DashboardAction),
    ModuleConfigs(ModuleConfigAction),
    Links(LinkAction),
    Todos(TodoAction),
    Timers(TimerAction),
    Global(GlobalConfigAction),
}

/// Applies one action to the state tree. Only timer actions can fail (a
/// never-created timer id is a programming error); every other slice is
/// total.
pub fn reduce(state: &mut AppState, action: Action) -> Result<(), TimerError> {
    match action {
        Action::Dashboards(action) => dashboards::reduce(&mut state.dashboards, action),
        Action::ModuleConfigs(action) => module_configs::reduce(&mut state.module_configs, action),
        Action::Links(action) => links::reduce(&mut state.module_links, action),
        Action::Todos(action) => todos::reduce(&mut state.todo, action),
        Action::Timers(action) => return timers::reduce(&mut state.timer, action),
        Action::Global(action) => global::reduce(&mut state.global_config, action),
    }
    Ok(())
}

/// Mutation-serializing container around [`AppState`]. Constructed once per
/// process with defaults or a rehydrated snapshot, and handed to services
/// by explicit injection.
pub struct Store {
    state: AppState,
    persister: Option<Box<dyn StatePersister>>,
}

impl Store {
    /// Store over freshly seeded default state, no persistence.
    pub fn with_defaults() -> Self {
        Self {
            state: AppState::default(),
            persister: None,
        }
    }

    /// Store over a preloaded snapshot (or defaults when `None`), saving
    /// through `persister` after every dispatch.
    pub fn new(preloaded: Option<AppState>, persister: Option<Box<dyn StatePersister>>) -> Self {
        Self {
            state: preloaded.unwrap_or_default(),
            persister,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies one action, then persists.
    pub fn dispatch(&mut self, action: Action) -> Result<(), TimerError> {
        reduce(&mut self.state, action)?;
        self.persist();
        Ok(())
    }

    /// Applies a whole batch, then persists once. Cascading multi-slice
    /// mutations go through here so intermediate steps are never observable
    /// in durable storage.
    pub fn dispatch_all(
        &mut self,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<(), TimerError> {
        for action in actions {
            reduce(&mut self.state, action)?;
        }
        self.persist();
        Ok(())
    }

    fn persist(&self) {
        let Some(persister) = &self.persister else {
            return;
        };
        if let Err(err) = persister.persist(&self.state) {
            // Degrades to "changes are not persisted"; the in-memory
            // session continues.
            warn!("event=state_save module=store status=error error={err}");
        }
    }
}
