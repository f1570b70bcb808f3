use anyhow::Context;
use shared_types::DisplaySettings;
use std::path::{Path, PathBuf};

/// Display settings persisted as JSON. Nothing expires and there is no
/// versioning; an unreadable file means defaults.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_path`]
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::new(default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> DisplaySettings {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return DisplaySettings::default()
            }
            Err(e) => {
                tracing::warn!("Could not read {}: {}", self.path.display(), e);
                return DisplaySettings::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(
                "Ignoring unreadable settings in {}: {}",
                self.path.display(),
                e
            );
            DisplaySettings::default()
        })
    }

    pub fn save(&self, settings: &DisplaySettings) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// `settings.json` under the local data directory
///
/// - **macOS**: `~/Library/Application Support/crm/settings.json`
/// - **Linux**: `~/.local/share/crm/settings.json`
/// - **Windows**: `%LOCALAPPDATA%\crm\settings.json`
pub fn default_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("crm").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Currency, DateFormat, Locale};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load(), DisplaySettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("crm").join("settings.json"));
        let settings = DisplaySettings {
            currency: Currency::Gbp,
            locale: Locale::EnGb,
            date_format: DateFormat::DayMonthYear,
        };

        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ currency: ").unwrap();

        let store = SettingsStore::new(path);
        assert_eq!(store.load(), DisplaySettings::default());
    }
}
