use anyhow::{Context, Result};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Statement};

use crate::db::quote_identifier;
use crate::models::Grid;

/// Load every row of a table into a [`Grid`]. The statement is an
/// unrestricted `SELECT *`; column names come from the statement metadata, so
/// the grid always matches the table's current shape. Full-table
/// materialization is intentional — this is small admin tooling, not a data
/// warehouse viewer.
pub fn load_table(conn: &Connection, table: &str) -> Result<Grid> {
    let sql = format!("SELECT * FROM {}", quote_identifier(table));
    let mut stmt = conn
        .prepare(&sql)
        .with_context(|| format!("failed to query table '{table}'"))?;
    grid_from_statement(&mut stmt).with_context(|| format!("failed to read table '{table}'"))
}

/// Run a prepared statement and materialize the full result set with every
/// value rendered as text. Shared between table browsing and the ad-hoc SQL
/// runner.
pub(crate) fn grid_from_statement(stmt: &mut Statement<'_>) -> Result<Grid> {
    let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_owned).collect();
    let column_count = columns.len();

    let rows = stmt
        .query_map([], |row| {
            let mut cells = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                cells.push(render_value(row.get_ref(idx)?));
            }
            Ok(cells)
        })
        .context("failed to execute query")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to read result rows")?;

    Ok(Grid { columns, rows })
}

/// Text rendering for a single cell. Column types are not tracked; everything
/// round-trips through text, which is lossy for display but matches what an
/// admin expects to see in a grid.
fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(int) => int.to_string(),
        ValueRef::Real(real) => real.to_string(),
        ValueRef::Text(text) => String::from_utf8_lossy(text).into_owned(),
        ValueRef::Blob(blob) => format!("<blob {} bytes>", blob.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        conn.execute(
            "CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT, score REAL, data BLOB)",
            [],
        )
        .expect("create table");
        conn
    }

    #[test]
    fn loads_columns_and_rows_as_text() {
        let conn = sample_conn();
        conn.execute(
            "INSERT INTO t (id, name, score, data) VALUES (1, 'alpha', 2.5, x'0102')",
            [],
        )
        .expect("insert row");

        let grid = load_table(&conn, "t").expect("load table");
        assert_eq!(grid.columns, vec!["id", "name", "score", "data"]);
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.rows[0], vec!["1", "alpha", "2.5", "<blob 2 bytes>"]);
    }

    #[test]
    fn null_values_render_as_the_null_marker() {
        let conn = sample_conn();
        conn.execute("INSERT INTO t (id) VALUES (7)", [])
            .expect("insert row");

        let grid = load_table(&conn, "t").expect("load table");
        assert_eq!(grid.rows[0], vec!["7", "NULL", "NULL", "NULL"]);
    }

    #[test]
    fn empty_table_keeps_its_column_header() {
        let conn = sample_conn();
        let grid = load_table(&conn, "t").expect("load table");
        assert!(grid.is_empty());
        assert_eq!(grid.columns.len(), 4);
    }

    #[test]
    fn awkward_table_names_survive_identifier_quoting() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        conn.execute("CREATE TABLE \"table\" (x INTEGER)", [])
            .expect("create keyword table");
        conn.execute("INSERT INTO \"table\" VALUES (42)", [])
            .expect("insert row");

        let grid = load_table(&conn, "table").expect("load keyword table");
        assert_eq!(grid.rows, vec![vec!["42".to_string()]]);
    }

    #[test]
    fn missing_table_surfaces_an_error() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        let err = load_table(&conn, "nope").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
