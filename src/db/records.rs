use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection};

use crate::db::quote_identifier;

/// Insert one row with a positional value for every column. Values are bound
/// as parameters, so cell content cannot break out of the statement; only the
/// table name is interpolated, and that goes through identifier quoting.
/// SQLite coerces the text values to the column affinities on its own.
pub fn insert_row(conn: &Connection, table: &str, values: &[String]) -> Result<()> {
    let placeholders = vec!["?"; values.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} VALUES ({placeholders})",
        quote_identifier(table)
    );
    conn.execute(&sql, params_from_iter(values.iter()))
        .with_context(|| format!("failed to insert into '{table}'"))?;
    Ok(())
}

/// Delete every row whose key column matches the given text value, returning
/// how many rows went away. A key value shared by several rows removes all of
/// them; the caller is expected to have confirmed with the user first. Zero
/// matches is not an error.
pub fn delete_rows(
    conn: &Connection,
    table: &str,
    key_column: &str,
    key_value: &str,
) -> Result<usize> {
    let sql = format!(
        "DELETE FROM {} WHERE {} = ?1",
        quote_identifier(table),
        quote_identifier(key_column)
    );
    conn.execute(&sql, params![key_value])
        .with_context(|| format!("failed to delete from '{table}'"))
}

/// Find the column deletes should match on: the declared primary key when the
/// table has one, otherwise the leftmost column. Tables with a composite
/// primary key yield its first column, which keeps the single-predicate
/// delete shape at the cost of matching wider than the full key.
pub fn primary_key_column(conn: &Connection, table: &str) -> Result<Option<String>> {
    let sql = format!("PRAGMA table_info({})", quote_identifier(table));
    let mut stmt = conn
        .prepare(&sql)
        .with_context(|| format!("failed to inspect table '{table}'"))?;

    let columns = stmt
        .query_map([], |row| {
            let name: String = row.get("name")?;
            let pk: i64 = row.get("pk")?;
            Ok((name, pk))
        })
        .context("failed to read table info")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect table info")?;

    let declared_pk = columns
        .iter()
        .filter(|(_, pk)| *pk > 0)
        .min_by_key(|(_, pk)| *pk)
        .map(|(name, _)| name.clone());

    Ok(declared_pk.or_else(|| columns.first().map(|(name, _)| name.clone())))
}

/// Create a table from a user-supplied name and column definition list. The
/// name is quoted; the column definitions are a raw DDL fragment
/// (`name TEXT, score REAL, ...`) passed through untouched, the same contract
/// the create-table prompt exposes.
pub fn create_table(conn: &Connection, name: &str, columns_sql: &str) -> Result<()> {
    let sql = format!("CREATE TABLE {} ({columns_sql})", quote_identifier(name));
    conn.execute(&sql, [])
        .with_context(|| format!("failed to create table '{name}'"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::db::{fetch_tables, load_table};

    fn conn_with_table() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        conn.execute("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)", [])
            .expect("create table");
        conn
    }

    #[test]
    fn inserted_row_reads_back_as_text() {
        let conn = conn_with_table();
        insert_row(&conn, "t", &["1".to_string(), "alpha".to_string()]).expect("insert");

        let grid = load_table(&conn, "t").expect("load");
        assert_eq!(grid.rows, vec![vec!["1".to_string(), "alpha".to_string()]]);
    }

    #[test]
    fn insert_with_wrong_arity_reports_an_error() {
        let conn = conn_with_table();
        let err = insert_row(&conn, "t", &["1".to_string()]).unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn delete_by_existing_key_removes_only_the_match() {
        let conn = conn_with_table();
        insert_row(&conn, "t", &["1".to_string(), "alpha".to_string()]).expect("insert");
        insert_row(&conn, "t", &["2".to_string(), "beta".to_string()]).expect("insert");

        let removed = delete_rows(&conn, "t", "id", "1").expect("delete");
        assert_eq!(removed, 1);

        let grid = load_table(&conn, "t").expect("load");
        assert_eq!(grid.rows, vec![vec!["2".to_string(), "beta".to_string()]]);
    }

    #[test]
    fn delete_by_absent_key_changes_nothing() {
        let conn = conn_with_table();
        insert_row(&conn, "t", &["1".to_string(), "alpha".to_string()]).expect("insert");

        let removed = delete_rows(&conn, "t", "id", "99").expect("delete");
        assert_eq!(removed, 0);
        assert_eq!(load_table(&conn, "t").expect("load").row_count(), 1);
    }

    #[test]
    fn delete_removes_every_row_sharing_the_key_value() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        conn.execute("CREATE TABLE t (tag TEXT, n INTEGER)", [])
            .expect("create table");
        insert_row(&conn, "t", &["dup".to_string(), "1".to_string()]).expect("insert");
        insert_row(&conn, "t", &["dup".to_string(), "2".to_string()]).expect("insert");
        insert_row(&conn, "t", &["keep".to_string(), "3".to_string()]).expect("insert");

        let removed = delete_rows(&conn, "t", "tag", "dup").expect("delete");
        assert_eq!(removed, 2);
        assert_eq!(load_table(&conn, "t").expect("load").row_count(), 1);
    }

    #[test]
    fn primary_key_lookup_prefers_the_declared_key() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        conn.execute(
            "CREATE TABLE t (label TEXT, id INTEGER PRIMARY KEY)",
            [],
        )
        .expect("create table");

        let key = primary_key_column(&conn, "t").expect("lookup");
        assert_eq!(key.as_deref(), Some("id"));
    }

    #[test]
    fn primary_key_lookup_falls_back_to_the_leftmost_column() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        conn.execute("CREATE TABLE t (a TEXT, b TEXT)", [])
            .expect("create table");

        let key = primary_key_column(&conn, "t").expect("lookup");
        assert_eq!(key.as_deref(), Some("a"));
    }

    #[test]
    fn primary_key_lookup_on_unknown_table_is_none() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        let key = primary_key_column(&conn, "ghost").expect("lookup");
        assert_eq!(key, None);
    }

    #[test]
    fn create_table_shows_up_in_the_catalog() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        create_table(&conn, "notes", "id INTEGER PRIMARY KEY, body TEXT").expect("create");
        assert_eq!(
            fetch_tables(&conn).expect("fetch"),
            vec!["notes".to_string()]
        );
    }

    #[test]
    fn create_table_with_bad_columns_reports_an_error() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        let err = create_table(&conn, "broken", "id INTEGR PRIMRY KEY ???").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
