use kanban_core::db::migrations::{apply_migrations, current_user_version, latest_version};
use kanban_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

fn table_columns(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});")).unwrap();
    let mut rows = stmt.query([]).unwrap();
    let mut columns = Vec::new();
    while let Some(row) = rows.next().unwrap() {
        columns.push(row.get::<_, String>(1).unwrap());
    }
    columns
}

#[test]
fn open_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());

    let task_columns = table_columns(&conn, "tasks");
    for column in [
        "id",
        "title",
        "description",
        "status",
        "label_id",
        "attachment_url",
        "version",
        "created_at",
        "updated_at",
    ] {
        assert!(task_columns.iter().any(|c| c == column), "missing tasks.{column}");
    }
    assert_eq!(table_columns(&conn, "comments").len(), 5);
    assert_eq!(table_columns(&conn, "labels").len(), 4);
}

#[test]
fn apply_migrations_is_idempotent() {
    let mut conn = open_db_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    apply_migrations(&mut conn).unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
        .unwrap();
    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion { db_version, latest_supported }
            if db_version == latest_version() + 1 && latest_supported == latest_version()
    ));
}

#[test]
fn file_database_keeps_schema_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.sqlite3");
    {
        let conn = open_db(&path).unwrap();
        conn.execute(
            "INSERT INTO labels (id, name, color) VALUES ('l1', 'General', '#64748b');",
            [],
        )
        .unwrap();
    }
    let reopened = open_db(&path).unwrap();
    let count: i64 = reopened
        .query_row("SELECT COUNT(*) FROM labels;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn schema_rejects_blank_title_and_unknown_status() {
    let conn = open_db_in_memory().unwrap();
    let blank = conn.execute(
        "INSERT INTO tasks (id, title, status, version, created_at, updated_at)
         VALUES ('a', '  ', 'todo', 0, 1, 1);",
        [],
    );
    assert!(blank.is_err());
    let bad_status = conn.execute(
        "INSERT INTO tasks (id, title, status, version, created_at, updated_at)
         VALUES ('b', 'ok', 'blocked', 0, 1, 1);",
        [],
    );
    assert!(bad_status.is_err());
}
