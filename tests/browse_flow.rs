//! End-to-end exercise of the persistence layer against a real database
//! file: create, populate, browse, mutate, and query through the same
//! functions the TUI calls.

use sqlite_compass::db::{
    create_table, delete_rows, fetch_tables, insert_row, load_table, primary_key_column, run_sql,
    Database, SqlOutcome,
};

#[test]
fn full_browse_and_edit_flow() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("compass.sqlite");

    // A brand-new database has no tables.
    let db = Database::create(&path).expect("create database");
    assert!(fetch_tables(db.conn()).expect("catalog").is_empty());

    // DDL through the same entry point the create-table dialog uses.
    create_table(db.conn(), "people", "id INTEGER PRIMARY KEY, name TEXT").expect("create table");
    assert_eq!(
        fetch_tables(db.conn()).expect("catalog"),
        vec!["people".to_string()]
    );

    // Insert with positional text values, then browse.
    insert_row(db.conn(), "people", &["1".to_string(), "Ada".to_string()]).expect("insert");
    insert_row(db.conn(), "people", &["2".to_string(), "Grace".to_string()]).expect("insert");

    let grid = load_table(db.conn(), "people").expect("load");
    assert_eq!(grid.columns, vec!["id", "name"]);
    assert_eq!(
        grid.rows,
        vec![
            vec!["1".to_string(), "Ada".to_string()],
            vec!["2".to_string(), "Grace".to_string()],
        ]
    );

    // Delete keyed on the declared primary key.
    let key = primary_key_column(db.conn(), "people")
        .expect("pk lookup")
        .expect("people has columns");
    assert_eq!(key, "id");
    assert_eq!(delete_rows(db.conn(), "people", &key, "1").expect("delete"), 1);
    assert_eq!(load_table(db.conn(), "people").expect("load").row_count(), 1);

    // Ad-hoc SQL: a SELECT renders rows, a bad statement is a plain error.
    match run_sql(db.conn(), "SELECT name FROM people").expect("query") {
        SqlOutcome::Rows(grid) => assert_eq!(grid.tab_separated(), "name\nGrace"),
        SqlOutcome::Changed(_) => panic!("SELECT must produce rows"),
    }
    assert!(run_sql(db.conn(), "SELEC * FROM people").is_err());

    // Changes persist past an explicit close.
    db.close();
    let db = Database::open(&path).expect("reopen");
    assert_eq!(load_table(db.conn(), "people").expect("load").row_count(), 1);
}
