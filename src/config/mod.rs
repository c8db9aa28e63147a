//! Settings merge system
//!
//! Three layers, later wins:
//! 1. Built-in defaults
//! 2. Settings file (~/.config/kcm/config.toml or --config)
//! 3. CLI flags

mod defaults;
mod merge;
mod settings;

pub use defaults::BuiltinDefaults;
pub use merge::{deep_merge, merge_layers};
pub use settings::{
    ConfigError, Settings, SettingsFile, SettingsOrigin, SettingsSource, DEFAULT_SETTINGS_PATH,
};
