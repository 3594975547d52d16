//! Pure per-collection reducers.
//!
//! # Responsibility
//! - One slice module per entity collection: a state struct, an action enum,
//!   and a `reduce` function.
//! - Keep every reducer free of cross-collection logic; multi-slice
//!   mutations are sequenced by `service`.
//!
//! # Invariants
//! - Update/remove actions targeting unknown ids are silent no-ops, so
//!   doubly-dispatched cleanup during cascades never fails.
//! - Add actions generate unique ids when the caller omits one.
//! - The timers slice is the single exception: addressing a timer that was
//!   never created is a programming error and returns `Err`.

pub mod dashboards;
pub mod global;
pub mod links;
pub mod module_configs;
pub mod timers;
pub mod todos;
