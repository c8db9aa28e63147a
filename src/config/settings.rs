//! Effective settings with provenance
//!
//! Built by layering the built-in defaults, the optional settings file and
//! the CLI flags, then expanding every path through a [`PathContext`].

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;
use crate::discovery::{PathContext, PathError};

/// Settings file location relative to the home directory
pub const DEFAULT_SETTINGS_PATH: &str = ".config/kcm/config.toml";

/// Origin of a settings layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOrigin {
    Builtin,
    File,
    Cli,
}

/// A contributing settings layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSource {
    pub origin: SettingsOrigin,

    /// File path (None for builtin/cli)
    pub path: Option<PathBuf>,
}

/// Where to read the settings file from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    pub path: PathBuf,
    /// Fail when the file is missing (true when named on the command line)
    pub required: bool,
}

impl SettingsFile {
    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    /// `~/.config/kcm/config.toml`, optional. None without a home directory.
    pub fn default_location(paths: &PathContext) -> Option<Self> {
        paths.home.as_ref().map(|home| Self {
            path: home.join(DEFAULT_SETTINGS_PATH),
            required: false,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    load: Vec<String>,
    save: String,
    exclude: Vec<String>,
    backup: bool,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Absolute locations to search, save target included
    pub load: Vec<PathBuf>,

    /// Absolute path of the merged kubeconfig
    pub save: PathBuf,

    /// Extra exclusion globs for directory walks
    pub exclude: Vec<String>,

    pub backup: bool,

    /// Contributing layers in precedence order
    pub sources: Vec<SettingsSource>,
}

impl Settings {
    /// Build settings from the layers.
    ///
    /// The save target is always part of `load`, so the kubeconfig about to
    /// be replaced is merged too.
    pub fn build(
        file: Option<&SettingsFile>,
        cli_overrides: Option<Value>,
        paths: &PathContext,
    ) -> Result<Self, ConfigError> {
        let mut layers = vec![BuiltinDefaults::default().to_value()];
        let mut sources = vec![SettingsSource {
            origin: SettingsOrigin::Builtin,
            path: None,
        }];

        if let Some(file) = file {
            if file.path.exists() {
                layers.push(Self::load_toml_file(&file.path)?);
                sources.push(SettingsSource {
                    origin: SettingsOrigin::File,
                    path: Some(file.path.clone()),
                });
            } else if file.required {
                return Err(ConfigError::NotFound(file.path.clone()));
            }
        }

        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(SettingsSource {
                origin: SettingsOrigin::Cli,
                path: None,
            });
        }

        let raw: RawSettings = serde_json::from_value(merge_layers(layers))
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::validate(&raw)?;

        let save = paths.expand(&raw.save)?;
        let mut load = Vec::with_capacity(raw.load.len() + 1);
        for location in &raw.load {
            let expanded = paths.expand(location)?;
            if !load.contains(&expanded) {
                load.push(expanded);
            }
        }
        if !load.contains(&save) {
            load.push(save.clone());
        }

        Ok(Self {
            load,
            save,
            exclude: raw.exclude,
            backup: raw.backup,
            sources,
        })
    }

    fn load_toml_file(path: &Path) -> Result<Value, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|e| {
            ConfigError::ParseError(format!("{}: TOML parse error: {}", path.display(), e))
        })
    }

    fn validate(raw: &RawSettings) -> Result<(), ConfigError> {
        if raw.save.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "save must not be empty".to_string(),
            ));
        }
        if raw.load.iter().any(|l| l.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "load entries must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a settings file contributed.
    pub fn file_source(&self) -> Option<&Path> {
        self.sources
            .iter()
            .find(|s| s.origin == SettingsOrigin::File)
            .and_then(|s| s.path.as_deref())
    }
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings file \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Path(#[from] PathError),
}
