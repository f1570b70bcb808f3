use crate::database::{not_found_or, AsyncDbConnection, StoreError};
use anyhow::Result;
use rusqlite::types::Type;
use rusqlite::{params, Row};
use shared_types::{CreateTaskRequest, Task, TaskPriority, TaskStatus};

const TASK_COLUMNS: &str = "id, task, status, priority, due_date, created_at";

pub async fn list_tasks(conn: AsyncDbConnection) -> Result<Vec<Task>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, id DESC"
    ))?;

    let tasks = stmt
        .query_map([], map_row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tasks)
}

pub async fn get_task(conn: AsyncDbConnection, id: i64) -> Result<Task> {
    let conn = conn.lock().await?;

    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
        params![id],
        map_row_to_task,
    )
    .map_err(|e| not_found_or("task", id, e))
}

pub async fn insert_task(conn: AsyncDbConnection, request: &CreateTaskRequest) -> Result<Task> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let id: i64 = conn.query_row(
        "INSERT INTO tasks (task, status, priority, due_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING id",
        params![
            &request.description,
            request.status.as_str(),
            request.priority.as_str(),
            request.due_date,
            now
        ],
        |row| row.get(0),
    )?;

    Ok(Task {
        id,
        description: request.description.clone(),
        status: request.status,
        priority: request.priority,
        due_date: request.due_date,
        created_at: now,
    })
}

pub async fn update_task(conn: AsyncDbConnection, id: i64, task: &Task) -> Result<()> {
    let conn = conn.lock().await?;

    let changed = conn.execute(
        "UPDATE tasks SET task = ?1, status = ?2, priority = ?3, due_date = ?4 WHERE id = ?5",
        params![
            &task.description,
            task.status.as_str(),
            task.priority.as_str(),
            task.due_date,
            id
        ],
    )?;

    if changed == 0 {
        return Err(StoreError::not_found("task", id));
    }

    Ok(())
}

pub async fn delete_task(conn: AsyncDbConnection, id: i64) -> Result<()> {
    let conn = conn.lock().await?;

    let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;

    if changed == 0 {
        return Err(StoreError::not_found("task", id));
    }

    Ok(())
}

fn map_row_to_task(row: &Row) -> rusqlite::Result<Task> {
    let status: String = row.get(2)?;
    let status = status
        .parse::<TaskStatus>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    let priority: String = row.get(3)?;
    let priority = priority
        .parse::<TaskPriority>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Task {
        id: row.get(0)?,
        description: row.get(1)?,
        status,
        priority,
        due_date: row.get(4)?,
        created_at: row.get(5)?,
    })
}
