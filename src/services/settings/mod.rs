// Settings service module
// Locates, reads and writes settings.toml

mod service;

pub use service::{SettingsService, CONFIG_ENV_VAR, SETTINGS_FILE};
