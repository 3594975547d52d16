//! Timers slice: per-instance study/break countdown state machine.
//!
//! # Responsibility
//! - Implement the timer transitions. Completion branching that touches the
//!   todos slice lives in `service::timer_service`, not here.
//!
//! # Invariants
//! - Unlike every other slice, addressing a timer id that was never created
//!   fails loudly: timers must exist before they are driven.
//! - Duration setters only touch the live countdown when the timer is
//!   stopped and sitting in the mode being configured.
//! - `time_remaining` never goes below zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::timer::{TimerInstance, DEFAULT_TIMER_ID};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimersState {
    pub timers: BTreeMap<String, TimerInstance>,
}

impl Default for TimersState {
    fn default() -> Self {
        let mut timers = BTreeMap::new();
        timers.insert(DEFAULT_TIMER_ID.to_string(), TimerInstance::default());
        Self { timers }
    }
}

impl TimersState {
    pub fn get(&self, timer_id: &str) -> Option<&TimerInstance> {
        self.timers.get(timer_id)
    }
}

/// Programming-error class for timer operations. Unlike the other slices,
/// a timer action against an unknown id fails loudly.
#[derive(Debug, PartialEq, Eq)]
pub enum TimerError {
    NotFound(String),
}

impl Display for TimerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "timer not found: {id}"),
        }
    }
}

impl Error for TimerError {}

#[derive(Debug, Clone, PartialEq)]
pub enum TimerAction {
    /// Creates a timer with default settings; no-op when the id exists.
    Add { timer_id: String },
    Start { timer_id: String },
    Pause { timer_id: String },
    Stop { timer_id: String },
    /// Stops and resets `time_remaining` (and elapsed time) for the
    /// current mode.
    Reset { timer_id: String },
    /// Flips study/break, resets the countdown to the new mode's duration,
    /// and stops the timer.
    ToggleMode { timer_id: String },
    /// External driver: `seconds` of wall time elapsed while running.
    Tick { timer_id: String, seconds: i64 },
    SetStudyDuration { timer_id: String, seconds: i64 },
    SetBreakDuration { timer_id: String, seconds: i64 },
    SetBreakMode {
        timer_id: String,
        mode: crate::model::timer::BreakMode,
    },
    ShowBreakPrompt { timer_id: String },
    HideBreakPrompt { timer_id: String },
    /// Prompt exit: enter a running break.
    StartBreak { timer_id: String },
    /// Prompt exit: stay in study mode, stopped, countdown reset.
    SkipBreak { timer_id: String },
}

impl TimerAction {
    fn timer_id(&self) -> &str {
        match self {
            TimerAction::Add { timer_id }
            | TimerAction::Start { timer_id }
            | TimerAction::Pause { timer_id }
            | TimerAction::Stop { timer_id }
            | TimerAction::Reset { timer_id }
            | TimerAction::ToggleMode { timer_id }
            | TimerAction::Tick { timer_id, .. }
            | TimerAction::SetStudyDuration { timer_id, .. }
            | TimerAction::SetBreakDuration { timer_id, .. }
            | TimerAction::SetBreakMode { timer_id, .. }
            | TimerAction::ShowBreakPrompt { timer_id }
            | TimerAction::HideBreakPrompt { timer_id }
            | TimerAction::StartBreak { timer_id }
            | TimerAction::SkipBreak { timer_id } => timer_id,
        }
    }
}

pub fn reduce(state: &mut TimersState, action: TimerAction) -> Result<(), TimerError> {
    if let TimerAction::Add { timer_id } = &action {
        state
            .timers
            .entry(timer_id.clone())
            .or_insert_with(TimerInstance::default);
        return Ok(());
    }

    let timer_id = action.timer_id().to_string();
    let timer = state
        .timers
        .get_mut(&timer_id)
        .ok_or(TimerError::NotFound(timer_id))?;

    match action {
        TimerAction::Add { .. } => {}
        TimerAction::Start { .. } => timer.is_running = true,
        TimerAction::Pause { .. } | TimerAction::Stop { .. } => timer.is_running = false,
        TimerAction::Reset { .. } => {
            timer.is_running = false;
            timer.time_remaining = timer.current_mode_duration();
            if timer.is_break {
                timer.break_elapsed_time = 0;
            } else {
                timer.study_elapsed_time = 0;
            }
        }
        TimerAction::ToggleMode { .. } => {
            timer.is_break = !timer.is_break;
            timer.is_running = false;
            timer.time_remaining = timer.current_mode_duration();
        }
        TimerAction::Tick { seconds, .. } => {
            if timer.is_running {
                timer.time_remaining = (timer.time_remaining - seconds).max(0);
                if timer.is_break {
                    timer.break_elapsed_time += seconds;
                } else {
                    timer.study_elapsed_time += seconds;
                }
            }
        }
        TimerAction::SetStudyDuration { seconds, .. } => {
            timer.study_duration = seconds.max(0);
            if !timer.is_running && !timer.is_break {
                timer.time_remaining = timer.study_duration;
            }
        }
        TimerAction::SetBreakDuration { seconds, .. } => {
            timer.break_duration = seconds.max(0);
            if !timer.is_running && timer.is_break {
                timer.time_remaining = timer.break_duration;
            }
        }
        TimerAction::SetBreakMode { mode, .. } => timer.break_mode = mode,
        TimerAction::ShowBreakPrompt { .. } => {
            timer.show_break_prompt = true;
            timer.is_running = false;
        }
        TimerAction::HideBreakPrompt { .. } => timer.show_break_prompt = false,
        TimerAction::StartBreak { .. } => {
            timer.show_break_prompt = false;
            timer.is_break = true;
            timer.is_running = true;
            timer.time_remaining = timer.break_duration;
            timer.break_elapsed_time = 0;
        }
        TimerAction::SkipBreak { .. } => {
            timer.show_break_prompt = false;
            timer.is_break = false;
            timer.is_running = false;
            timer.time_remaining = timer.study_duration;
        }
    }

    Ok(())
}
