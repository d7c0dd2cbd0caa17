// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task CRUD and status updates.

use inboxpilot_core::types::{NewTask, Task, now_timestamp};
use inboxpilot_core::{InboxError, ParentType};
use rusqlite::params;

use crate::database::Database;

const SELECT_TASK: &str =
    "SELECT id, parent_type, parent_id, description, status, due_date, created_at FROM tasks";

fn map_task(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        parent_type: super::parent_type_at(row, 1)?,
        parent_id: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        due_date: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub async fn add_task(db: &Database, task: &NewTask, user_id: i64) -> Result<i64, InboxError> {
    let task = task.clone();
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO tasks (user_id, parent_type, parent_id, description, status,
                    due_date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    user_id,
                    task.parent_type.to_string(),
                    task.parent_id,
                    task.description,
                    task.status,
                    task.due_date,
                    now_timestamp(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn list_tasks(
    db: &Database,
    parent_type: ParentType,
    parent_id: i64,
    user_id: i64,
) -> Result<Vec<Task>, InboxError> {
    let parent = parent_type.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<Task>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_TASK} WHERE user_id = ?1 AND parent_type = ?2 AND parent_id = ?3
                 ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map(params![user_id, parent, parent_id], map_task)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Every task not marked `done`, oldest first.
pub async fn list_open_tasks(db: &Database, user_id: i64) -> Result<Vec<Task>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Vec<Task>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_TASK} WHERE user_id = ?1 AND status != 'done' ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map(params![user_id], map_task)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Returns whether a task owned by `user_id` was updated.
pub async fn update_task_status(
    db: &Database,
    task_id: i64,
    status: &str,
    user_id: i64,
) -> Result<bool, InboxError> {
    let status = status.to_string();
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let changed = conn.execute(
                "UPDATE tasks SET status = ?1 WHERE id = ?2 AND user_id = ?3",
                params![status, task_id, user_id],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::db_with_user;

    #[tokio::test]
    async fn open_tasks_exclude_done() {
        let (db, user) = db_with_user("a@example.com").await;
        let first = add_task(&db, &NewTask::open(ParentType::Message, 1, "Send deck"), user)
            .await
            .unwrap();
        add_task(&db, &NewTask::open(ParentType::Meeting, 2, "Book room"), user)
            .await
            .unwrap();

        assert!(update_task_status(&db, first, "done", user).await.unwrap());

        let open = list_open_tasks(&db, user).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].description, "Book room");
        assert_eq!(open[0].status, "open");
    }

    #[tokio::test]
    async fn update_of_foreign_task_reports_false() {
        let (db, user) = db_with_user("a@example.com").await;
        let id = add_task(&db, &NewTask::open(ParentType::Message, 1, "Mine"), user)
            .await
            .unwrap();
        assert!(!update_task_status(&db, id, "done", user + 1).await.unwrap());
        assert!(!update_task_status(&db, id + 100, "done", user).await.unwrap());
    }

    #[tokio::test]
    async fn list_tasks_filters_by_parent() {
        let (db, user) = db_with_user("a@example.com").await;
        add_task(&db, &NewTask::open(ParentType::Message, 1, "A"), user)
            .await
            .unwrap();
        add_task(&db, &NewTask::open(ParentType::Message, 2, "B"), user)
            .await
            .unwrap();

        let tasks = list_tasks(&db, ParentType::Message, 1, user).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].parent_id, 1);
        assert_eq!(tasks[0].parent_type, ParentType::Message);
    }
}
