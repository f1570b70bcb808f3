use std::sync::Arc;

use chrono::NaiveDate;
use shared_types::{Currency, DateFormat, DisplaySettings, Locale};
use tokio::sync::RwLock;

use super::SharedSettings;
use crate::format::{format_currency, format_date};
use crate::settings_store::SettingsStore;

/// Display preferences, saved on every change
#[derive(Clone)]
pub struct SettingsView {
    store: SettingsStore,
    settings: SharedSettings,
}

impl SettingsView {
    /// Loads the stored settings, or defaults
    pub fn open(store: SettingsStore) -> Self {
        let settings = Arc::new(RwLock::new(store.load()));
        Self { store, settings }
    }

    /// Handle read by the views that format values
    pub fn shared(&self) -> SharedSettings {
        self.settings.clone()
    }

    pub async fn settings(&self) -> DisplaySettings {
        *self.settings.read().await
    }

    pub async fn set_currency(&self, currency: Currency) -> anyhow::Result<DisplaySettings> {
        self.update(|s| s.currency = currency).await
    }

    pub async fn set_locale(&self, locale: Locale) -> anyhow::Result<DisplaySettings> {
        self.update(|s| s.locale = locale).await
    }

    pub async fn set_date_format(&self, date_format: DateFormat) -> anyhow::Result<DisplaySettings> {
        self.update(|s| s.date_format = date_format).await
    }

    /// `amount` and `date` as they render under the current settings
    pub async fn preview(&self, amount: f64, date: NaiveDate) -> (String, String) {
        let settings = *self.settings.read().await;
        (
            format_currency(amount, &settings),
            format_date(date, settings.date_format),
        )
    }

    /// The shared settings only change once the new value is on disk
    async fn update(&self, f: impl FnOnce(&mut DisplaySettings)) -> anyhow::Result<DisplaySettings> {
        let mut settings = self.settings.write().await;
        let mut changed = *settings;
        f(&mut changed);
        self.store.save(&changed)?;
        *settings = changed;
        tracing::info!("Saved display settings to {}", self.store.path().display());
        Ok(changed)
    }
}
