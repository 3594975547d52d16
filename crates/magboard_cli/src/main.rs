//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `magboard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use magboard_core::Store;

fn main() {
    let store = Store::with_defaults();
    let state = store.state();
    println!("magboard_core version={}", magboard_core::core_version());
    println!("dashboards={}", state.dashboards.dashboards.len());
    println!(
        "active={}",
        state
            .dashboards
            .active_dashboard_id
            .as_deref()
            .unwrap_or("none")
    );
    println!("timers={}", state.timer.timers.len());
}
