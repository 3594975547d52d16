//! Connection bootstrap for the SQLite-backed state store.
//!
//! # Responsibility
//! - Open file or in-memory connections.
//! - Configure pragmas and run migrations before handing the connection
//!   out.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::PersistResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens the state database file and applies all pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> PersistResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=persist status=start mode=file");
    let result = Connection::open(path)
        .map_err(Into::into)
        .and_then(|mut conn| bootstrap_connection(&mut conn).map(|()| conn));
    log_open_outcome("file", started_at, &result);
    result
}

/// Opens an in-memory state database, mainly for tests and dry runs.
pub fn open_db_in_memory() -> PersistResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=persist status=start mode=memory");
    let result = Connection::open_in_memory()
        .map_err(Into::into)
        .and_then(|mut conn| bootstrap_connection(&mut conn).map(|()| conn));
    log_open_outcome("memory", started_at, &result);
    result
}

fn bootstrap_connection(conn: &mut Connection) -> PersistResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}

fn log_open_outcome(mode: &str, started_at: Instant, result: &PersistResult<Connection>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!("event=db_open module=persist status=ok mode={mode} duration_ms={duration_ms}"),
        Err(err) => error!(
            "event=db_open module=persist status=error mode={mode} duration_ms={duration_ms} error={err}"
        ),
    }
}
