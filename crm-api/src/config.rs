use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 8080

[cors]
# Origins allowed to call the API from a browser
allowed_origins = ["http://localhost:3000"]

[database]
# Defaults to the local data directory when unset
# path = "/var/lib/crm/crm.sqlite3"
"#;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiConfig {
    pub server: Option<ServerConfig>,
    pub cors: Option<CorsConfig>,
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

impl ApiConfig {
    /// Loads the config from the default location, writing a commented
    /// default file first if none exists.
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();
        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .build()?;

        builder.try_deserialize()
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn database_path(&self) -> Option<PathBuf> {
        self.database.as_ref().and_then(|db| db.path.clone())
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("crm").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
