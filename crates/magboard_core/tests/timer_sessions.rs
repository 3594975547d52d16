use magboard_core::reducer::timers::TimerAction;
use magboard_core::reducer::todos::TodoAction;
use magboard_core::{
    Action, BreakMode, Store, TimerService, Todo, DEFAULT_LIST_ID, DEFAULT_TIMER_ID,
};

fn store_with_active_goal() -> (Store, String) {
    let mut store = Store::with_defaults();
    let todo = Todo::new(DEFAULT_LIST_ID, "deep work");
    let todo_id = todo.id.clone();
    store
        .dispatch(Action::Todos(TodoAction::Add {
            todo,
            set_as_active: true,
        }))
        .unwrap();
    (store, todo_id)
}

fn start_with_durations(store: &mut Store, study: i64, mode: BreakMode) {
    store
        .dispatch_all(vec![
            Action::Timers(TimerAction::SetStudyDuration {
                timer_id: DEFAULT_TIMER_ID.to_string(),
                seconds: study,
            }),
            Action::Timers(TimerAction::SetBreakMode {
                timer_id: DEFAULT_TIMER_ID.to_string(),
                mode,
            }),
            Action::Timers(TimerAction::Start {
                timer_id: DEFAULT_TIMER_ID.to_string(),
            }),
        ])
        .unwrap();
}

#[test]
fn manual_mode_completion_records_session_and_prompts() {
    let (mut store, todo_id) = store_with_active_goal();
    start_with_durations(&mut store, 120, BreakMode::Manual);

    let mut service = TimerService::new(&mut store);
    service.tick(DEFAULT_TIMER_ID, 120).unwrap();

    let state = store.state();
    let todo = state.todo.find(&todo_id).unwrap();
    assert_eq!(todo.total_time_studied, 120);
    assert_eq!(todo.sessions.len(), 1);
    assert_eq!(todo.sessions[0].duration, 120);
    assert!(todo.sessions[0].completed);

    let timer = state.timer.get(DEFAULT_TIMER_ID).unwrap();
    assert!(timer.show_break_prompt);
    assert!(!timer.is_running);
    assert!(!timer.is_break);
}

#[test]
fn automatic_mode_completion_rolls_into_running_break() {
    let (mut store, todo_id) = store_with_active_goal();
    start_with_durations(&mut store, 60, BreakMode::Automatic);

    let mut service = TimerService::new(&mut store);
    service.tick(DEFAULT_TIMER_ID, 60).unwrap();

    let state = store.state();
    assert_eq!(state.todo.find(&todo_id).unwrap().total_time_studied, 60);

    let timer = state.timer.get(DEFAULT_TIMER_ID).unwrap();
    assert!(timer.is_break);
    assert!(timer.is_running);
    assert!(!timer.show_break_prompt);
    assert_eq!(timer.time_remaining, timer.break_duration);
    assert_eq!(timer.study_elapsed_time, 0);
}

#[test]
fn none_mode_completion_stays_stopped_in_study() {
    let (mut store, _) = store_with_active_goal();
    start_with_durations(&mut store, 60, BreakMode::None);

    let mut service = TimerService::new(&mut store);
    service.tick(DEFAULT_TIMER_ID, 60).unwrap();

    let timer = store.state().timer.get(DEFAULT_TIMER_ID).unwrap();
    assert!(!timer.is_break);
    assert!(!timer.is_running);
    assert!(!timer.show_break_prompt);
    assert_eq!(timer.time_remaining, timer.study_duration);
}

#[test]
fn completion_without_active_goal_records_nothing() {
    let mut store = Store::with_defaults();
    start_with_durations(&mut store, 60, BreakMode::None);

    let mut service = TimerService::new(&mut store);
    service.tick(DEFAULT_TIMER_ID, 60).unwrap();

    assert!(store
        .state()
        .todo
        .todos_by_list
        .values()
        .all(|todos| todos.is_empty()));
}

#[test]
fn break_completion_returns_to_study_without_prompt() {
    let (mut store, todo_id) = store_with_active_goal();
    start_with_durations(&mut store, 60, BreakMode::Automatic);

    let mut service = TimerService::new(&mut store);
    service.tick(DEFAULT_TIMER_ID, 60).unwrap();
    let break_duration = store
        .state()
        .timer
        .get(DEFAULT_TIMER_ID)
        .unwrap()
        .break_duration;

    let mut service = TimerService::new(&mut store);
    service.tick(DEFAULT_TIMER_ID, break_duration).unwrap();

    let state = store.state();
    let timer = state.timer.get(DEFAULT_TIMER_ID).unwrap();
    assert!(!timer.is_break);
    assert!(!timer.is_running);
    assert!(!timer.show_break_prompt);
    assert_eq!(timer.time_remaining, timer.study_duration);
    // Break time is never billed to the goal.
    assert_eq!(state.todo.find(&todo_id).unwrap().sessions.len(), 1);
}

#[test]
fn partial_ticks_accumulate_before_completion() {
    let (mut store, todo_id) = store_with_active_goal();
    start_with_durations(&mut store, 90, BreakMode::None);

    let mut service = TimerService::new(&mut store);
    service.tick(DEFAULT_TIMER_ID, 30).unwrap();
    service.tick(DEFAULT_TIMER_ID, 30).unwrap();
    assert!(store.state().todo.find(&todo_id).unwrap().sessions.is_empty());
    let mut service = TimerService::new(&mut store);
    service.tick(DEFAULT_TIMER_ID, 30).unwrap();

    let todo = store.state().todo.find(&todo_id).unwrap();
    assert_eq!(todo.sessions.len(), 1);
    assert_eq!(todo.total_time_studied, 90);
}

#[test]
fn ticking_a_never_created_timer_errors() {
    let mut store = Store::with_defaults();
    let mut service = TimerService::new(&mut store);
    let error = service.tick("ghost", 1).unwrap_err();
    assert!(error.to_string().contains("ghost"));
}

#[test]
fn second_timer_instance_runs_independently() {
    let mut store = Store::with_defaults();
    let mut service = TimerService::new(&mut store);
    service.create_timer("side").unwrap();
    store
        .dispatch(Action::Timers(TimerAction::Start {
            timer_id: "side".to_string(),
        }))
        .unwrap();

    let mut service = TimerService::new(&mut store);
    service.tick("side", 10).unwrap();

    let state = store.state();
    assert_eq!(state.timer.get("side").unwrap().study_elapsed_time, 10);
    assert_eq!(state.timer.get(DEFAULT_TIMER_ID).unwrap().study_elapsed_time, 0);
}
