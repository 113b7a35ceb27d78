//! Editor configuration via `page-editor.toml`.
//!
//! Every key is optional. Environment variables override the file:
//!
//! | Variable | Key |
//! |---|---|
//! | `PAGE_EDITOR_TOKEN` | `auth_token` |
//! | `PAGE_EDITOR_LOG` | `log_filter` |

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const TOKEN_ENV: &str = "PAGE_EDITOR_TOKEN";
pub const LOG_ENV: &str = "PAGE_EDITOR_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// # Example
///
/// ```toml
/// # Bearer token sent with every page request. Without one, saving fails
/// # and the user has to log in.
/// auth_token = "dev-token"
///
/// # Capacity of the page store's request channel (default: 32)
/// store_buffer = 32
///
/// # Default tracing filter when RUST_LOG is unset (default: "info")
/// log_filter = "page_editor=debug"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(default = "default_store_buffer")]
    pub store_buffer: usize,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_store_buffer() -> usize {
    32
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            auth_token: None,
            store_buffer: default_store_buffer(),
            log_filter: default_log_filter(),
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse config from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Applies `PAGE_EDITOR_TOKEN` and `PAGE_EDITOR_LOG` when they are set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    /// Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());
        if let Some(token) = value(TOKEN_ENV) {
            self.auth_token = Some(token);
        }
        if let Some(filter) = value(LOG_ENV) {
            self.log_filter = filter;
        }
        self
    }
}
