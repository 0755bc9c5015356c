//! Persistence module split across logical submodules. Every function takes a
//! borrowed [`rusqlite::Connection`] so the UI layer stays in charge of the
//! connection lifecycle.

mod catalog;
mod connection;
mod grid;
mod query;
mod records;

pub use catalog::fetch_tables;
pub use connection::Database;
pub use grid::load_table;
pub use query::{run_sql, SqlOutcome};
pub use records::{create_table, delete_rows, insert_row, primary_key_column};

/// Quote a table or column name for interpolation into generated SQL. SQLite
/// identifier quoting wraps the name in double quotes and doubles any embedded
/// double quote, so arbitrary names (including keywords and spaces) stay a
/// single identifier token.
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
