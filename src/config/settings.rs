//! Service settings loaded from YAML.

use super::merge::merge_yaml;
use rando_query::PageDefaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default location of the base settings file.
pub const DEFAULT_SETTINGS_PATH: &str = "settings/defaults.yaml";

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Error reading a settings file
    #[error("Failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing YAML
    #[error("Failed to parse settings YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A value is out of range
    #[error("Invalid setting '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub data: DataSettings,
    pub logging: LoggingSettings,
    pub populate: PopulateSettings,
    pub server: ServerSettings,
}

/// MongoDB connection and query settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataSettings {
    pub protocol: String,
    pub host: String,
    pub database: String,
    /// Raw URI query string, e.g. `authSource=admin`
    pub options: String,
    pub username: String,
    pub password: String,
    pub default_page_size: i64,
    pub max_page_size: i64,
    /// Per-request and startup deadline
    pub timeout_seconds: u64,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            protocol: "mongodb".to_string(),
            host: "localhost:27017".to_string(),
            database: "rando".to_string(),
            options: String::new(),
            username: String::new(),
            password: String::new(),
            default_page_size: 100,
            max_page_size: 1000,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PopulateSettings {
    pub enabled: bool,
    /// Documents per collection
    pub count: u64,
    pub batch_size: usize,
}

impl Default for PopulateSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            count: 10_000_000,
            batch_size: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    pub address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:8080".to_string(),
        }
    }
}

impl Settings {
    /// Load the base settings file and, if `env` is given, deep-merge
    /// `<env>.yaml` from the same directory over it. A missing overlay is
    /// ignored; a missing base file is an error.
    pub fn load(path: &Path, env: Option<&str>) -> Result<Self, SettingsError> {
        let mut merged = read_yaml(path)?;

        if let Some(env) = env.filter(|e| !e.is_empty()) {
            let overlay_path = path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(format!("{env}.yaml"));
            if overlay_path.is_file() {
                tracing::debug!("Applying settings overlay {:?}", overlay_path);
                merge_yaml(&mut merged, read_yaml(&overlay_path)?);
            } else {
                tracing::debug!("No settings overlay at {:?}", overlay_path);
            }
        }

        let settings: Settings = serde_yaml::from_value(merged)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.data.default_page_size < 1 {
            return Err(SettingsError::Invalid {
                key: "data.defaultPageSize",
                reason: format!("must be at least 1, got {}", self.data.default_page_size),
            });
        }
        if self.data.max_page_size < 1 {
            return Err(SettingsError::Invalid {
                key: "data.maxPageSize",
                reason: format!("must be at least 1, got {}", self.data.max_page_size),
            });
        }
        if self.data.timeout_seconds == 0 {
            return Err(SettingsError::Invalid {
                key: "data.timeoutSeconds",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.populate.batch_size == 0 {
            return Err(SettingsError::Invalid {
                key: "populate.batchSize",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// MongoDB connection URI. Credentials are left out when either the
    /// username or the password is empty.
    pub fn mongo_uri(&self) -> String {
        let data = &self.data;
        if data.username.is_empty() || data.password.is_empty() {
            format!(
                "{}://{}/{}?{}",
                data.protocol, data.host, data.database, data.options
            )
        } else {
            format!(
                "{}://{}:{}@{}/{}?{}",
                data.protocol, data.username, data.password, data.host, data.database, data.options
            )
        }
    }

    pub fn page_defaults(&self) -> PageDefaults {
        PageDefaults::new(self.data.default_page_size, self.data.max_page_size)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.data.timeout_seconds)
    }
}

fn read_yaml(path: &Path) -> Result<serde_yaml::Value, SettingsError> {
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // An empty file deserializes to null; treat it as an empty mapping
    let value: serde_yaml::Value = serde_yaml::from_str(&content)?;
    Ok(match value {
        serde_yaml::Value::Null => serde_yaml::Value::Mapping(Default::default()),
        other => other,
    })
}
