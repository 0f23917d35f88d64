//! Configuration System
//!
//! Handles loading shell configuration from TOML files and environment
//! variables. The web build embeds its TOML at compile time and only uses
//! [`ShellConfig::from_toml_str`].

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub mount: MountConfig,

    #[serde(default)]
    pub links: LinkConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Mount point configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MountConfig {
    /// Id of the element whose content is replaced on every render
    #[serde(default = "default_mount_id")]
    pub id: String,
}

fn default_mount_id() -> String {
    "app".to_string()
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            id: default_mount_id(),
        }
    }
}

/// In-app link marking
#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    /// Boolean attribute flagging anchors for client-side routing
    #[serde(default = "default_link_attribute")]
    pub attribute: String,

    /// Class toggled on the anchor matching the current path
    #[serde(default = "default_active_class")]
    pub active_class: String,
}

fn default_link_attribute() -> String {
    "data-link".to_string()
}

fn default_active_class() -> String {
    "active".to_string()
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            attribute: default_link_attribute(),
            active_class: default_active_class(),
        }
    }
}

/// Render cycle configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub policy: RenderPolicy,
}

/// What to do when a render cycle completes after a newer one started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPolicy {
    /// Mount only if no newer cycle started meanwhile
    #[default]
    LatestIntent,
    /// Mount every completion; the last one to finish wins
    LastCompleted,
}

impl FromStr for RenderPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest_intent" | "latest-intent" => Ok(RenderPolicy::LatestIntent),
            "last_completed" | "last-completed" => Ok(RenderPolicy::LastCompleted),
            other => Err(ConfigError::InvalidValue {
                key: "render.policy".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Auth API collaborator settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the auth REST API, absolute or origin-relative
    #[serde(default = "default_api_base")]
    pub base_url: String,

    /// Storage key holding the bearer token
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

fn default_api_base() -> String {
    "/api/v1".to_string()
}

fn default_token_key() -> String {
    "auth_token".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base(),
            token_key: default_token_key(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ShellConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            error: e.to_string(),
        })
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("authshell").join("config.toml")),
            Some(PathBuf::from("./authshell.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(id) = std::env::var("AUTHSHELL_MOUNT_ID") {
            self.mount.id = id;
        }

        if let Ok(policy) = std::env::var("AUTHSHELL_RENDER_POLICY") {
            match policy.parse() {
                Ok(p) => self.render.policy = p,
                Err(e) => tracing::warn!("Ignoring AUTHSHELL_RENDER_POLICY: {}", e),
            }
        }

        if let Ok(url) = std::env::var("AUTHSHELL_API_URL") {
            self.api.base_url = url;
        }

        if let Ok(level) = std::env::var("AUTHSHELL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("AUTHSHELL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Authshell Configuration
#
# Environment variables override these settings:
# - AUTHSHELL_MOUNT_ID
# - AUTHSHELL_RENDER_POLICY
# - AUTHSHELL_API_URL
# - AUTHSHELL_LOG_LEVEL
# - AUTHSHELL_LOG_FORMAT

[mount]
# Id of the element that receives every rendered view
id = "app"

[links]
# Attribute that flags anchors for in-app navigation
attribute = "data-link"

# Class set on the link pointing at the current path
active_class = "active"

[render]
# latest_intent: drop views that finish after a newer navigation started
# last_completed: mount every view as it finishes (last one wins)
policy = "latest_intent"

[api]
# Auth API base URL
base_url = "/api/v1"

# Local storage key of the bearer token
token_key = "auth_token"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
