//! Grid placement: size registry, free-position search, image sizing.
//!
//! # Responsibility
//! - Compute non-overlapping grid rectangles and content-aware sizes for
//!   newly added modules.
//!
//! # Invariants
//! - Everything here is pure; no shared mutable state.

pub mod engine;
pub mod registry;
