//! Explicit board configuration.
//!
//! # Invariants
//! - The core never reads environment variables to pick a backend; hosts
//!   build or parse a `BoardConfig` and pass it to `open_board`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Which Entity Store implementation backs the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Process-local store; state lives as long as the board object.
    #[default]
    Memory,
    /// Shared SQLite store. `path: None` opens a private in-memory database.
    Sqlite {
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

impl BackendConfig {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sqlite { .. } => "sqlite",
        }
    }
}

/// Startup configuration for one board instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub backend: BackendConfig,
    /// Seed the demo labels, tasks and comment into an empty store.
    pub seed_demo_data: bool,
}

impl BoardConfig {
    pub fn memory() -> Self {
        Self::default()
    }

    pub fn sqlite(path: Option<PathBuf>) -> Self {
        Self {
            backend: BackendConfig::Sqlite { path },
            seed_demo_data: false,
        }
    }

    pub fn with_demo_data(mut self) -> Self {
        self.seed_demo_data = true;
        self
    }

    /// Parses a JSON document such as
    /// `{"backend":{"kind":"sqlite","path":"/tmp/board.db"},"seed_demo_data":true}`.
    ///
    /// Blank input yields the default (memory, unseeded) configuration.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid board config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
        }
    }
}
