//! Screen state for each entity. Views mutate their list before the
//! request goes out and roll back when it fails.

mod contacts;
mod deals;
mod settings;
mod tasks;

pub use contacts::{ContactRow, ContactsView};
pub use deals::{DealRow, DealsView, NO_CONTACT};
pub use settings::SettingsView;
pub use tasks::{TaskRow, TasksView};

use std::sync::Arc;

use shared_types::DisplaySettings;
use tokio::sync::RwLock;

use crate::error::ClientError;
use crate::optimistic::OptimisticList;

pub type SharedList<T> = Arc<RwLock<OptimisticList<T>>>;
pub type SharedSettings = Arc<RwLock<DisplaySettings>>;
pub type ViewResult<T> = Result<T, ClientError>;

pub(crate) fn shared_list<T>() -> SharedList<T> {
    Arc::new(RwLock::new(OptimisticList::default()))
}

pub(crate) fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
