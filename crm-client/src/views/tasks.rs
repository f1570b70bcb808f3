use std::sync::Arc;

use shared_types::{CreateTaskRequest, Task, TaskPriority, TaskStatus, UpdateTaskRequest};
use tracing::{info, warn};

use super::{now, shared_list, SharedList, ViewResult};
use crate::api::CrmApi;
use crate::format::format_due_date;
use crate::notify::Notifier;

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub id: Option<i64>,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: String,
}

#[derive(Clone)]
pub struct TasksView {
    api: Arc<dyn CrmApi>,
    notifier: Arc<dyn Notifier>,
    tasks: SharedList<Task>,
}

impl TasksView {
    pub fn new(api: Arc<dyn CrmApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            tasks: shared_list(),
        }
    }

    pub fn list(&self) -> SharedList<Task> {
        self.tasks.clone()
    }

    pub async fn refresh(&self) -> ViewResult<()> {
        match self.api.list_tasks().await {
            Ok(tasks) => {
                self.tasks.write().await.replace_all(tasks);
                Ok(())
            }
            Err(e) => {
                self.notifier.error(&e.user_message("Failed to fetch tasks"));
                Err(e)
            }
        }
    }

    pub async fn add_task(&self, request: CreateTaskRequest) -> ViewResult<Task> {
        let provisional = Task {
            id: 0,
            description: request.description.clone(),
            status: request.status,
            priority: request.priority,
            due_date: request.due_date,
            created_at: now(),
        };
        let key = self.tasks.write().await.insert_provisional(provisional);

        match self.api.create_task(&request).await {
            Ok(saved) => {
                info!("Added task {}", saved.id);
                self.tasks.write().await.confirm(key, saved.clone());
                Ok(saved)
            }
            Err(e) => {
                warn!("Reverting new task {}: {}", key, e);
                self.tasks.write().await.discard(key);
                self.notifier.error(&e.user_message("Failed to add task"));
                Err(e)
            }
        }
    }

    pub async fn update_task(&self, id: i64, request: UpdateTaskRequest) -> ViewResult<Task> {
        let snapshot = self
            .tasks
            .write()
            .await
            .patch(id, |task| request.apply_to(task));

        match self.api.update_task(id, &request).await {
            Ok(saved) => {
                info!("Updated task {}", id);
                self.tasks.write().await.replace(id, saved.clone());
                Ok(saved)
            }
            Err(e) => {
                warn!("Reverting task {}: {}", id, e);
                if let Some(snapshot) = snapshot {
                    self.tasks.write().await.revert(snapshot);
                }
                self.notifier.error(&e.user_message("Failed to update task"));
                Err(e)
            }
        }
    }

    pub async fn change_status(&self, id: i64, status: TaskStatus) -> ViewResult<Task> {
        let request = UpdateTaskRequest {
            status: Some(status),
            ..UpdateTaskRequest::default()
        };
        self.update_task(id, request).await
    }

    pub async fn delete_task(&self, id: i64) -> ViewResult<()> {
        let removed = self.tasks.write().await.remove(id);

        match self.api.delete_task(id).await {
            Ok(()) => {
                info!("Deleted task {}", id);
                Ok(())
            }
            Err(e) => {
                warn!("Restoring task {}: {}", id, e);
                if let Some(removed) = removed {
                    self.tasks.write().await.restore(removed);
                }
                self.notifier.error(&e.user_message("Failed to delete task"));
                Err(e)
            }
        }
    }

    pub async fn rows(&self) -> Vec<TaskRow> {
        let tasks = self.tasks.read().await;
        tasks
            .rows()
            .iter()
            .map(|row| TaskRow {
                id: (!row.is_provisional()).then_some(row.record.id),
                description: row.record.description.clone(),
                status: row.record.status,
                priority: row.record.priority,
                due_date: format_due_date(row.record.due_date),
            })
            .collect()
    }
}
