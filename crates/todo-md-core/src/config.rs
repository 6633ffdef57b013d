//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/todo-md/config.{toml,yaml,yml,json})
//! 3. Environment variables (TODO_MD_* prefix)
//!
//! Environment variables take precedence over config file values. The
//! file format is chosen by the file extension.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable prefix
const ENV_PREFIX: &str = "TODO_MD";

/// Directory under the platform config dir
const APP_DIR: &str = "todo-md";

/// Config file names tried in order when no path is given
const CONFIG_FILE_NAMES: &[&str] = &["config.toml", "config.yaml", "config.yml", "config.json"];

/// Todo file name used when nothing else is configured
const DEFAULT_TODO_FILE: &str = "TODO.md";

/// Errors that can occur while loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config file '{path}': {details}")]
    Parse {
        path: PathBuf,
        format: ConfigFormat,
        details: String,
    },

    #[error("Failed to serialize config as {format}: {details}")]
    Serialize { format: ConfigFormat, details: String },

    #[error("Unsupported config file type '{path}'. Use .toml, .yaml, .yml or .json")]
    UnsupportedFormat { path: PathBuf },
}

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (.toml extension)
    Toml,
    /// YAML format (.yaml or .yml extensions)
    Yaml,
    /// JSON format (.json extension)
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from a config file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    fn parse(self, content: &str) -> Result<Config, String> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            // An empty YAML document is null, not an empty map
            Self::Yaml if content.trim().is_empty() => Ok(Config::default()),
            Self::Yaml => serde_yaml_ng::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }

    fn render(self, config: &Config) -> Result<String, String> {
        match self {
            Self::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml_ng::to_string(config).map_err(|e| e.to_string()),
            Self::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
        }
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Toml => f.write_str("TOML"),
            Self::Yaml => f.write_str("YAML"),
            Self::Json => f.write_str("JSON"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Editor command used by `edit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Default todo file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Pager/viewer the rendered lists are piped to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer: Option<String>,

    /// Where to write logs when TODO_MD_LOG is set (stderr otherwise)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default location and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_file_only(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load only what the file itself says, without environment overrides
    ///
    /// Updates are merged into this before saving.
    pub fn load_file_only(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;

        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        format.parse(&content).map_err(|details| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            details,
        })
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // TODO_MD_FILE
        if let Ok(val) = std::env::var(format!("{}_FILE", ENV_PREFIX)) {
            self.file = if val.is_empty() { None } else { Some(PathBuf::from(val)) };
        }

        // TODO_MD_EDITOR
        if let Ok(val) = std::env::var(format!("{}_EDITOR", ENV_PREFIX)) {
            self.editor = if val.is_empty() { None } else { Some(val) };
        }

        // TODO_MD_VIEWER
        if let Ok(val) = std::env::var(format!("{}_VIEWER", ENV_PREFIX)) {
            self.viewer = if val.is_empty() { None } else { Some(val) };
        }
    }

    /// Save configuration to a specific path, in the format its extension names
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let content = format
            .render(self)
            .map_err(|details| ConfigError::Serialize { format, details })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the config file path
    ///
    /// Can be overridden with TODO_MD_CONFIG environment variable. Otherwise
    /// the first existing of config.toml, config.yaml, config.yml and
    /// config.json in the config directory, defaulting to config.toml.
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        let dir = config_dir();
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
            .unwrap_or_else(|| dir.join(CONFIG_FILE_NAMES[0]))
    }

    /// Resolve the todo file: command line, then config/env, then ~/TODO.md
    pub fn todo_file_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.file.clone())
            .unwrap_or_else(default_todo_file)
    }
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Get the default todo file
fn default_todo_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_TODO_FILE)
}
