//! Configuration: `restyle.yaml` plus environment overrides.
//!
//! Resolution order for the file: `--config`, then `RESTYLE_CONFIG`, then
//! `./restyle.yaml` when it exists. Without a file every field takes its
//! default. Environment variables are applied last:
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `RESTYLE_STORAGE_DIR` | `storage_dir` |
//! | `RESTYLE_ASSIST_ENDPOINT` | `assist.endpoint` |
//! | `RESTYLE_API_KEY` | bearer token for the assist relay (never read from the file) |
//!
//! ```yaml
//! storage_dir: .restyle
//! storage_key: "restyle:state"
//! debounce_ms: 400
//! history_capacity: 20
//! breakpoint: md
//! assist:
//!   endpoint: http://localhost:8787/api/ai-assist
//!   model: gpt-4o-mini
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use restyle_assist::DEFAULT_ENDPOINT;
use restyle_core::Breakpoint;
use restyle_store::{StoreOptions, DEFAULT_CAPACITY, DEFAULT_KEY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV: &str = "RESTYLE_CONFIG";
pub const STORAGE_DIR_ENV: &str = "RESTYLE_STORAGE_DIR";
pub const ENDPOINT_ENV: &str = "RESTYLE_ASSIST_ENDPOINT";
pub const API_KEY_ENV: &str = "RESTYLE_API_KEY";

/// File name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "restyle.yaml";

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Abstraction over environment variables.
pub trait EnvReader {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnv;

impl EnvReader for RealEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

/// Fixed environment for tests.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvReader for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Assist relay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    pub endpoint: String,
    pub model: Option<String>,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: None,
            api_key: None,
        }
    }
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub storage_key: String,
    pub debounce_ms: u64,
    pub history_capacity: usize,
    pub breakpoint: Breakpoint,
    pub assist: AssistConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".restyle"),
            storage_key: DEFAULT_KEY.to_string(),
            debounce_ms: 400,
            history_capacity: DEFAULT_CAPACITY,
            breakpoint: Breakpoint::Auto,
            assist: AssistConfig::default(),
        }
    }
}

impl Config {
    /// Locates, reads and resolves the configuration.
    pub fn load(explicit: Option<&Path>, env: &dyn EnvReader) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env.var(CONFIG_ENV).map(PathBuf::from))
            .or_else(|| {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.is_file().then_some(local)
            });

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(env);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses YAML; an empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn apply_env(&mut self, env: &dyn EnvReader) {
        if let Some(dir) = env.var(STORAGE_DIR_ENV) {
            self.storage_dir = PathBuf::from(dir);
        }
        if let Some(endpoint) = env.var(ENDPOINT_ENV) {
            self.assist.endpoint = endpoint;
        }
        if let Some(key) = env.var(API_KEY_ENV) {
            self.assist.api_key = Some(key);
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions::default()
            .key(self.storage_key.clone())
            .debounce(Duration::from_millis(self.debounce_ms))
            .history_capacity(self.history_capacity)
    }
}
