//! Timer driving and completion orchestration.
//!
//! # Responsibility
//! - Advance timers from the external clock and, when a countdown hits
//!   zero, sequence the cross-slice completion: session accounting against
//!   the active goal, then the configured break transition.
//!
//! # Invariants
//! - The timer and todo slices never reference each other; this service is
//!   the only coupling between them.
//! - A completion is one dispatch batch: the recorded session and the
//!   timer transition land in the same persisted snapshot.

use log::info;

use crate::model::timer::BreakMode;
use crate::reducer::timers::TimerAction;
use crate::reducer::todos::TodoAction;
use crate::service::ServiceError;
use crate::store::{Action, Store};

/// Drives one timer instance against wall-clock ticks.
pub struct TimerService<'a> {
    store: &'a mut Store,
}

impl<'a> TimerService<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Creates a timer instance; no-op when the id already exists.
    pub fn create_timer(&mut self, timer_id: &str) -> Result<(), ServiceError> {
        self.store.dispatch(Action::Timers(TimerAction::Add {
            timer_id: timer_id.to_string(),
        }))?;
        Ok(())
    }

    /// Advances `timer_id` by `seconds` of elapsed wall time and handles
    /// completion when the countdown reaches zero while running.
    ///
    /// # Errors
    /// - `ServiceError::Timer` when the timer was never created.
    pub fn tick(&mut self, timer_id: &str, seconds: i64) -> Result<(), ServiceError> {
        self.store.dispatch(Action::Timers(TimerAction::Tick {
            timer_id: timer_id.to_string(),
            seconds,
        }))?;

        let Some(timer) = self.store.state().timer.get(timer_id) else {
            // Tick above would already have failed; nothing to complete.
            return Ok(());
        };
        if !timer.is_running || timer.time_remaining > 0 {
            return Ok(());
        }

        if timer.is_break {
            self.complete_break(timer_id)
        } else {
            self.complete_study(timer_id)
        }
    }

    /// Study countdown hit zero: record the elapsed study time against the
    /// active goal, then branch on the configured break mode.
    fn complete_study(&mut self, timer_id: &str) -> Result<(), ServiceError> {
        let timer = self
            .store
            .state()
            .timer
            .get(timer_id)
            .cloned()
            .unwrap_or_default();
        let elapsed = timer.study_elapsed_time;

        let mut batch = Vec::new();
        if elapsed > 0 {
            if let Some(goal) = self.store.state().todo.active_goal() {
                batch.push(Action::Todos(TodoAction::CompleteSession {
                    todo_id: goal.id.clone(),
                    duration: elapsed,
                    completed: true,
                }));
            }
        }

        // Reset clears the finished study segment before the transition.
        batch.push(Action::Timers(TimerAction::Reset {
            timer_id: timer_id.to_string(),
        }));
        match timer.break_mode {
            BreakMode::Automatic => batch.push(Action::Timers(TimerAction::StartBreak {
                timer_id: timer_id.to_string(),
            })),
            BreakMode::Manual => batch.push(Action::Timers(TimerAction::ShowBreakPrompt {
                timer_id: timer_id.to_string(),
            })),
            BreakMode::None => {}
        }
        self.store.dispatch_all(batch)?;
        info!(
            "event=study_complete module=service status=ok timer={timer_id} elapsed={elapsed} break_mode={:?}",
            timer.break_mode
        );
        Ok(())
    }

    /// Break countdown hit zero: always returns straight to study mode,
    /// never through the prompt path.
    fn complete_break(&mut self, timer_id: &str) -> Result<(), ServiceError> {
        self.store.dispatch_all(vec![
            Action::Timers(TimerAction::Reset {
                timer_id: timer_id.to_string(),
            }),
            Action::Timers(TimerAction::ToggleMode {
                timer_id: timer_id.to_string(),
            }),
        ])?;
        info!("event=break_complete module=service status=ok timer={timer_id}");
        Ok(())
    }
}
