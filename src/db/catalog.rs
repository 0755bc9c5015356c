use anyhow::{Context, Result};
use rusqlite::Connection;

/// List every user table in the database, sorted by name. SQLite's own
/// bookkeeping tables (`sqlite_sequence` and friends) are filtered out since
/// they are not browsable data. The caller replaces its table list wholesale
/// with the result; there is no diffing.
pub fn fetch_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )
        .context("failed to prepare table listing query")?;

    let tables = stmt
        .query_map([], |row| row.get(0))
        .context("failed to list tables")?
        .collect::<Result<Vec<String>, _>>()
        .context("failed to collect table names")?;

    Ok(tables)
}
