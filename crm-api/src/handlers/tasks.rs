use actix_web::{web, HttpResponse};
use shared_types::{CreateTaskRequest, MessageResponse, UpdateTaskRequest};
use std::sync::Arc;
use tracing::info;

use crate::database::tasks as tasks_db;
use crate::database::Database;
use crate::error::{parse_id, ApiError};

pub async fn list_tasks(db: web::Data<Arc<Database>>) -> Result<HttpResponse, ApiError> {
    let tasks = tasks_db::list_tasks(db.async_connection.clone())
        .await
        .map_err(|e| ApiError::store("Error fetching tasks", e))?;

    Ok(HttpResponse::Ok().json(tasks))
}

pub async fn get_task(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let task_id = parse_id(&path, "task")?;

    let task = tasks_db::get_task(db.async_connection.clone(), task_id)
        .await
        .map_err(|e| ApiError::store("Error fetching task", e))?;

    Ok(HttpResponse::Ok().json(task))
}

pub async fn create_task(
    db: web::Data<Arc<Database>>,
    request: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = request.into_inner();

    if req.description.trim().is_empty() {
        return Err(ApiError::bad_request("Task cannot be empty"));
    }

    let task = tasks_db::insert_task(db.async_connection.clone(), &req)
        .await
        .map_err(|e| ApiError::store("Error creating task", e))?;

    info!("Created task {} due {}", task.id, task.due_date);

    Ok(HttpResponse::Ok().json(task))
}

pub async fn update_task(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
    request: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let task_id = parse_id(&path, "task")?;
    let req = request.into_inner();

    let mut task = tasks_db::get_task(db.async_connection.clone(), task_id)
        .await
        .map_err(|e| ApiError::store("Error updating task", e))?;

    req.apply_to(&mut task);

    tasks_db::update_task(db.async_connection.clone(), task_id, &task)
        .await
        .map_err(|e| ApiError::store("Error updating task", e))?;

    info!("Updated task {} ({})", task_id, task.status);

    Ok(HttpResponse::Ok().json(task))
}

pub async fn delete_task(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let task_id = parse_id(&path, "task")?;

    tasks_db::delete_task(db.async_connection.clone(), task_id)
        .await
        .map_err(|e| ApiError::store("Error deleting task", e))?;

    info!("Deleted task {}", task_id);

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Task deleted".to_string(),
    }))
}
