use shelf_db::schema::{create_schema, CURRENT_VERSION};
use shelf_db::{open_database, open_memory};

fn schema_version(conn: &rusqlite::Connection) -> i32 {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .unwrap()
}

fn table_exists(conn: &rusqlite::Connection, name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE name=?1)",
        [name],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    assert_eq!(schema_version(&conn), CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();
    assert_eq!(schema_version(&conn), CURRENT_VERSION);
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    for table in ["schema_version", "games", "game_genres", "game_platforms"] {
        assert!(table_exists(&conn, table), "table {table} should exist");
    }
}

#[test]
fn case_folding_function_is_registered() {
    let conn = open_memory().unwrap();
    let hit: bool = conn
        .query_row(
            "SELECT contains_ignore_case('The Legend of ZELDA', 'zelda')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(hit);
}

#[test]
fn open_database_creates_parent_directories() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("dir").join("games.db");
    let conn = open_database(&path).unwrap();
    assert!(path.exists());
    assert_eq!(schema_version(&conn), CURRENT_VERSION);
}

#[test]
fn reopening_current_database_leaves_version_alone() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("games.db");
    drop(open_database(&path).unwrap());

    let conn = open_database(&path).unwrap();
    assert_eq!(schema_version(&conn), CURRENT_VERSION);
    let rows: i32 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
    assert!(table_exists(&conn, "idx_games_flags"));
}

#[test]
fn newer_database_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("games.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION + 1],
        )
        .unwrap();
    }
    assert!(open_database(&path).is_err());
}
