//! Settings loading.

pub mod merge;
pub mod settings;

pub use settings::{
    DataSettings, LoggingSettings, PopulateSettings, ServerSettings, Settings, SettingsError,
    DEFAULT_SETTINGS_PATH,
};
