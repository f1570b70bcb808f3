pub mod api;
pub mod error;
pub mod format;
pub mod notify;
pub mod optimistic;
pub mod settings_store;
pub mod views;

pub use api::{CrmApi, HttpCrmApi};
pub use error::ClientError;
pub use notify::{Notifier, StderrNotifier, TracingNotifier};
