//! Cross-entity coordination services.
//!
//! # Responsibility
//! - Sequence multi-slice mutations (cascade deletes, add-module flow,
//!   timer completion) so they are atomic from the caller's point of view.
//!
//! # Invariants
//! - Services never mutate slices directly; every mutation is a dispatched
//!   batch, persisted once per batch.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::reducer::timers::TimerError;

pub mod board_service;
pub mod timer_service;

#[derive(Debug)]
pub enum ServiceError {
    /// Target dashboard does not exist (add flows only; removals are
    /// silent no-ops by contract).
    DashboardNotFound(String),
    /// A timer operation addressed an id that was never created.
    Timer(TimerError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DashboardNotFound(id) => write!(f, "dashboard not found: {id}"),
            Self::Timer(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Timer(err) => Some(err),
            Self::DashboardNotFound(_) => None,
        }
    }
}

impl From<TimerError> for ServiceError {
    fn from(value: TimerError) -> Self {
        Self::Timer(value)
    }
}
