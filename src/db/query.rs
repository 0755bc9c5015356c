use anyhow::{bail, Context, Result};
use rusqlite::Connection;

use crate::db::grid::grid_from_statement;
use crate::models::Grid;

/// What a free-form statement produced: a result set for SELECTs, or the
/// affected-row count for everything else.
#[derive(Debug)]
pub enum SqlOutcome {
    Rows(Grid),
    Changed(usize),
}

/// Execute one raw user-supplied statement. The branch mirrors the statement
/// policy of the SQL screen: text that starts with `select` (after trimming,
/// case-folded) is treated as a query and materialized; anything else runs
/// through `execute` under SQLite's autocommit. Engine errors come back as
/// ordinary `Err` values for the caller to display; nothing here panics or
/// retries.
pub fn run_sql(conn: &Connection, sql: &str) -> Result<SqlOutcome> {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        bail!("nothing to execute");
    }

    if trimmed.to_lowercase().starts_with("select") {
        let mut stmt = conn
            .prepare(trimmed)
            .context("failed to prepare statement")?;
        let grid = grid_from_statement(&mut stmt)?;
        Ok(SqlOutcome::Rows(grid))
    } else {
        let changed = conn
            .execute(trimmed, [])
            .context("failed to execute statement")?;
        Ok(SqlOutcome::Changed(changed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::db::load_table;

    #[test]
    fn select_one_yields_a_single_cell_grid() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        let outcome = run_sql(&conn, "SELECT 1").expect("run");
        match outcome {
            SqlOutcome::Rows(grid) => {
                assert_eq!(grid.columns, vec!["1"]);
                assert_eq!(grid.rows, vec![vec!["1".to_string()]]);
                assert_eq!(grid.tab_separated(), "1\n1");
            }
            SqlOutcome::Changed(_) => panic!("SELECT must produce rows"),
        }
    }

    #[test]
    fn select_detection_ignores_case_and_whitespace() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        let outcome = run_sql(&conn, "   SeLeCt 'x' AS label").expect("run");
        assert!(matches!(outcome, SqlOutcome::Rows(_)));
    }

    #[test]
    fn ddl_and_dml_report_affected_rows() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        let outcome = run_sql(&conn, "CREATE TABLE t (id INTEGER)").expect("create");
        assert!(matches!(outcome, SqlOutcome::Changed(0)));

        let outcome = run_sql(&conn, "INSERT INTO t VALUES (1), (2)").expect("insert");
        assert!(matches!(outcome, SqlOutcome::Changed(2)));
    }

    #[test]
    fn malformed_statement_leaves_data_untouched() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        conn.execute("CREATE TABLE t (id INTEGER)", [])
            .expect("create table");
        conn.execute("INSERT INTO t VALUES (1)", [])
            .expect("insert row");

        let err = run_sql(&conn, "SELEC * FROM t").unwrap_err();
        assert!(!err.to_string().is_empty());
        assert_eq!(load_table(&conn, "t").expect("load").row_count(), 1);
    }

    #[test]
    fn empty_input_is_rejected_before_touching_the_engine() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        let err = run_sql(&conn, "   \n  ").unwrap_err();
        assert!(err.to_string().contains("nothing to execute"));
    }
}
