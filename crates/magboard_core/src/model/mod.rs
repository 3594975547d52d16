//! Domain model for the dashboard state tree.
//!
//! # Responsibility
//! - Define the canonical serde shapes for every persisted entity.
//! - Keep wire names (camelCase, `type`, `static`) matching the stored
//!   JSON layout so old snapshots keep loading.
//!
//! # Invariants
//! - Entity ids are stable strings and never reused.
//! - Model types hold no cross-collection logic; that lives in `reducer`
//!   and `service`.

pub mod config;
pub mod dashboard;
pub mod link;
pub mod timer;
pub mod todo;
