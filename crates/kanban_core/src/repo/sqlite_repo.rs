//! SQLite-backed board repository (shared-store backend).
//!
//! # Responsibility
//! - Persist tasks, comments and labels in the migrated board schema.
//! - Enforce the OCC guard inside SQL so that several connections on one
//!   database file still see at most one winner per version.
//!
//! # Invariants
//! - `replace_task` is a single conditional `UPDATE ... AND version = ?`.
//! - `remove_task` deletes comments and task in one transaction.
//! - `insert_comment` checks task existence and inserts in one statement.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{current_user_version, latest_version};
use crate::model::comment::Comment;
use crate::model::label::Label;
use crate::model::task::{Task, TaskStatus};
use crate::repo::board_repo::{
    ensure_replacement_version, BoardRepository, RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Mutex, MutexGuard};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    status,
    label_id,
    attachment_url,
    version,
    created_at,
    updated_at
FROM tasks";

const COMMENT_SELECT_SQL: &str = "SELECT id, task_id, body, created_at FROM comments";

/// Board repository over one owned, migrated connection.
pub struct SqliteBoardRepository {
    conn: Mutex<Connection>,
}

impl SqliteBoardRepository {
    /// Wraps a connection returned by `open_db` / `open_db_in_memory`.
    ///
    /// # Errors
    /// - `InvalidData` when the schema is not at the latest migration.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let expected = latest_version();
        let actual = current_user_version(&conn)?;
        if actual != expected {
            return Err(RepoError::InvalidData(format!(
                "board repository requires schema version {expected}, got {actual}"
            )));
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RepoError::Unavailable("board connection lock poisoned".to_string()))
    }
}

impl BoardRepository for SqliteBoardRepository {
    fn get_task(&self, id: &str) -> RepoResult<Task> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return parse_task_row(row);
        }
        Err(RepoError::TaskNotFound(id.to_string()))
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL} ORDER BY seq DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn insert_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;
        let conn = self.lock()?;
        if task_exists(&conn, &task.id)? {
            return Err(RepoError::DuplicateId(task.id.clone()));
        }
        conn.execute(
            "INSERT INTO tasks (
                id,
                title,
                description,
                status,
                label_id,
                attachment_url,
                version,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                task.id.as_str(),
                task.title.as_str(),
                task.description.as_deref(),
                task.status.as_db_str(),
                task.label_id.as_deref(),
                task.attachment_url.as_deref(),
                version_to_db(task.version)?,
                task.created_at,
                task.updated_at,
            ],
        )?;
        Ok(())
    }

    fn replace_task(&self, task: &Task, expected_version: u64) -> RepoResult<()> {
        task.validate()?;
        ensure_replacement_version(task, expected_version)?;

        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE tasks
             SET
                title = ?2,
                description = ?3,
                status = ?4,
                label_id = ?5,
                attachment_url = ?6,
                version = ?7,
                updated_at = ?8
             WHERE id = ?1
               AND version = ?9;",
            params![
                task.id.as_str(),
                task.title.as_str(),
                task.description.as_deref(),
                task.status.as_db_str(),
                task.label_id.as_deref(),
                task.attachment_url.as_deref(),
                version_to_db(task.version)?,
                task.updated_at,
                version_to_db(expected_version)?,
            ],
        )?;
        if changed == 1 {
            return Ok(());
        }

        let stored: Option<i64> = conn
            .query_row(
                "SELECT version FROM tasks WHERE id = ?1;",
                [task.id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        match stored {
            None => Err(RepoError::TaskNotFound(task.id.clone())),
            Some(actual) => Err(RepoError::VersionMismatch {
                id: task.id.clone(),
                expected: expected_version,
                actual: version_from_db(actual)?,
            }),
        }
    }

    fn remove_task(&self, id: &str) -> RepoResult<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM comments WHERE task_id = ?1;", [id])?;
        let removed = tx.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        tx.commit()?;
        Ok(removed > 0)
    }

    fn insert_comment(&self, comment: &Comment) -> RepoResult<()> {
        comment.validate()?;
        let conn = self.lock()?;
        let inserted = conn.execute(
            "INSERT INTO comments (id, task_id, body, created_at)
             SELECT ?1, ?2, ?3, ?4
             WHERE EXISTS (SELECT 1 FROM tasks WHERE id = ?2);",
            params![
                comment.id.as_str(),
                comment.task_id.as_str(),
                comment.body.as_str(),
                comment.created_at,
            ],
        )?;
        if inserted == 0 {
            return Err(RepoError::TaskNotFound(comment.task_id.clone()));
        }
        Ok(())
    }

    fn list_comments_for(&self, task_id: &str) -> RepoResult<Vec<Comment>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "{COMMENT_SELECT_SQL} WHERE task_id = ?1 ORDER BY seq DESC;"
        ))?;
        let mut rows = stmt.query([task_id])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(Comment {
                id: row.get("id")?,
                task_id: row.get("task_id")?,
                body: row.get("body")?,
                created_at: row.get("created_at")?,
            });
        }
        Ok(comments)
    }

    fn list_labels(&self) -> RepoResult<Vec<Label>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name, color FROM labels ORDER BY seq ASC;")?;
        let mut rows = stmt.query([])?;
        let mut labels = Vec::new();
        while let Some(row) = rows.next()? {
            let label = Label {
                id: row.get("id")?,
                name: row.get("name")?,
                color: row.get("color")?,
            };
            label.validate()?;
            labels.push(label);
        }
        Ok(labels)
    }

    fn insert_label(&self, label: &Label) -> RepoResult<()> {
        label.validate()?;
        let conn = self.lock()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO labels (id, name, color) VALUES (?1, ?2, ?3);",
            params![label.id.as_str(), label.name.as_str(), label.color.as_str()],
        )?;
        if inserted == 0 {
            return Err(RepoError::DuplicateId(label.id.clone()));
        }
        Ok(())
    }
}

fn task_exists(conn: &Connection, id: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let status_text: String = row.get("status")?;
    let status = TaskStatus::from_db_str(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid task status `{status_text}` in tasks.status"))
    })?;

    let task = Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status,
        label_id: row.get("label_id")?,
        attachment_url: row.get("attachment_url")?,
        version: version_from_db(row.get("version")?)?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    task.validate()?;
    Ok(task)
}

fn version_to_db(version: u64) -> RepoResult<i64> {
    i64::try_from(version)
        .map_err(|_| RepoError::InvalidData(format!("task version {version} exceeds i64")))
}

fn version_from_db(value: i64) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative task version `{value}` in tasks.version")))
}
