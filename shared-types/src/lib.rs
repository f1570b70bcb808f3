use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod contact;
pub mod de;
pub mod deal;
pub mod settings;
pub mod task;

pub use contact::{Contact, CreateContactRequest, UpdateContactRequest};
pub use deal::{CreateDealRequest, Deal, DealStage, UpdateDealRequest};
pub use settings::{Currency, DateFormat, DisplaySettings, Locale, ParseSettingError};
pub use task::{CreateTaskRequest, Task, TaskPriority, TaskStatus, UpdateTaskRequest};

/// Error response for API endpoints
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
    /// Underlying cause, only sent by the deal routes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Body returned by `DELETE /api/contacts/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Body returned by `DELETE /api/tasks/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}
