//! Core library surface for the SQLite Compass TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: a thin persistence layer over rusqlite and the interactive
//! application state.

pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer.
pub use db::{fetch_tables, load_table, run_sql, Database, SqlOutcome};

/// The result-set type that moves between the database layer and the UI.
pub use models::Grid;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
