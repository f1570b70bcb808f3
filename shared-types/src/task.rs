use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::settings::ParseSettingError;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TaskStatus::ALL
            .into_iter()
            .find(|status| {
                status.as_str().eq_ignore_ascii_case(wanted)
                    || status.as_str().replace(' ', "-").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ParseSettingError::new("task status", s))
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskPriority::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSettingError::new("task priority", s))
    }
}

/// A follow-up or reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    /// What needs doing. Sent as `task` on the wire.
    #[serde(rename = "task", alias = "description")]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[ts(type = "string")]
    pub due_date: NaiveDate,
    pub created_at: i64,
}

/// Request to create a new task
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(rename = "task", alias = "description")]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(deserialize_with = "crate::de::due_date")]
    #[ts(type = "string")]
    pub due_date: NaiveDate,
}

/// Request to update a task; only the supplied fields change
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(
        rename = "task",
        alias = "description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(
        default,
        deserialize_with = "crate::de::optional_due_date",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(type = "string | null")]
    pub due_date: Option<NaiveDate>,
}

impl UpdateTaskRequest {
    pub fn apply_to(&self, task: &mut Task) {
        // An empty description is treated as "not sent", like the web form did.
        if let Some(description) = self.description.as_ref().filter(|d| !d.is_empty()) {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task {
            id: 3,
            description: "Send proposal".to_string(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            created_at: 0,
        }
    }

    #[test]
    fn test_task_wire_format() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["task"], "Send proposal");
        assert_eq!(json["status"], "To Do");
        assert_eq!(json["dueDate"], "2026-10-20");
    }

    #[test]
    fn test_create_request_defaults_and_iso_date() {
        let req: CreateTaskRequest = serde_json::from_str(
            r#"{"task": "Call back", "dueDate": "2026-10-20T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(req.status, TaskStatus::Todo);
        assert_eq!(req.priority, TaskPriority::Medium);
        assert_eq!(req.due_date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let res = serde_json::from_str::<UpdateTaskRequest>(r#"{"status": "Blocked"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_update_status_only() {
        let req: UpdateTaskRequest = serde_json::from_str(r#"{"status": "Completed"}"#).unwrap();
        let mut task = sample();
        req.apply_to(&mut task);
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.description, "Send proposal");
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("in-progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("to do".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert!("done".parse::<TaskStatus>().is_err());
    }
}
