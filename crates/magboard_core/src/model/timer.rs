//! Study/break timer model.
//!
//! # Responsibility
//! - Hold the per-instance countdown state driven by the timer reducer.
//!
//! # Invariants
//! - Durations and remaining time are whole seconds, never negative.
//! - `show_break_prompt` is only ever true directly after a completed study
//!   session in `manual` break mode.

use serde::{Deserialize, Serialize};

/// Well-known id of the timer seeded on a fresh install.
pub const DEFAULT_TIMER_ID: &str = "default";

pub const DEFAULT_STUDY_DURATION_SECS: i64 = 25 * 60;
pub const DEFAULT_BREAK_DURATION_SECS: i64 = 5 * 60;

/// How a finished study session transitions into a break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BreakMode {
    /// Completion rolls straight into a running break.
    #[default]
    Automatic,
    /// Completion stops and raises the break prompt.
    Manual,
    /// Completion stops in study mode; no break is offered.
    None,
}

/// One countdown instance, keyed by an arbitrary id in the timers slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerInstance {
    pub time_remaining: i64,
    pub is_running: bool,
    pub is_break: bool,
    pub study_duration: i64,
    pub break_duration: i64,
    pub study_elapsed_time: i64,
    pub break_elapsed_time: i64,
    pub show_break_prompt: bool,
    #[serde(default)]
    pub break_mode: BreakMode,
}

impl Default for TimerInstance {
    fn default() -> Self {
        Self {
            time_remaining: DEFAULT_STUDY_DURATION_SECS,
            is_running: false,
            is_break: false,
            study_duration: DEFAULT_STUDY_DURATION_SECS,
            break_duration: DEFAULT_BREAK_DURATION_SECS,
            study_elapsed_time: 0,
            break_elapsed_time: 0,
            show_break_prompt: false,
            break_mode: BreakMode::default(),
        }
    }
}

impl TimerInstance {
    /// Configured duration for the mode the timer currently sits in.
    pub fn current_mode_duration(&self) -> i64 {
        if self.is_break {
            self.break_duration
        } else {
            self.study_duration
        }
    }
}
