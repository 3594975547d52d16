//! Core state engine for the magboard dashboard app.
//! This crate is the single source of truth for business invariants:
//! normalized entity slices, cross-entity cascades, grid placement, and
//! the durable snapshot cycle.

pub mod logging;
pub mod model;
pub mod persist;
pub mod placement;
pub mod reducer;
pub mod select;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::config::{GlobalConfig, ModuleConfig};
pub use model::dashboard::{
    Breakpoint, Dashboard, LayoutEntry, ModuleInstance, DEFAULT_DASHBOARD_ID,
};
pub use model::link::{LinkMetadata, LinkPattern, ModuleLink};
pub use model::timer::{BreakMode, TimerInstance, DEFAULT_TIMER_ID};
pub use model::todo::{Priority, Todo, TodoSession, DEFAULT_LIST_ID};
pub use persist::{load_state, open_db, open_db_in_memory, save_state, SqliteStatePersister};
pub use placement::registry::ModuleTypeRegistry;
pub use service::board_service::{BoardService, ContentItem, ModulePlacement};
pub use service::timer_service::TimerService;
pub use service::ServiceError;
pub use store::{Action, AppState, Store};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
