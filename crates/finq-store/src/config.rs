//! Store configuration read from the environment.
//!
//! | Variable             | Meaning                                  | Default |
//! |----------------------|------------------------------------------|---------|
//! | `FINQ_DATA_PROVIDER` | `json` or `api`                          | `json`  |
//! | `FINQ_DATA_ROOT`     | directory containing the `data/` tree    | `.`     |
//! | `FINQ_API_URL`       | base URL recorded for the remote backend | unset   |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::env::{EnvReader, RealEnv};
use crate::error::{Result, StoreError};

pub const PROVIDER_VAR: &str = "FINQ_DATA_PROVIDER";
pub const DATA_ROOT_VAR: &str = "FINQ_DATA_ROOT";
pub const API_URL_VAR: &str = "FINQ_API_URL";

/// Which backend serves the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderKind {
    /// Static JSON files under the data root.
    #[default]
    Json,
    /// Remote API. Not backed by anything yet.
    Api,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Json => "json",
            ProviderKind::Api => "api",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ProviderKind::Json),
            "api" => Ok(ProviderKind::Api),
            other => Err(StoreError::Config(format!(
                "unknown data provider '{other}' (expected 'json' or 'api')"
            ))),
        }
    }
}

/// Resolved store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub provider: ProviderKind,
    pub data_root: PathBuf,
    pub api_url: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Json,
            data_root: PathBuf::from("."),
            api_url: None,
        }
    }
}

impl StoreConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_reader(&RealEnv)
    }

    /// Reads the configuration through `env`. Empty values count as unset.
    pub fn from_reader(env: &dyn EnvReader) -> Result<Self> {
        let read = |name: &str| env.var(name).filter(|v| !v.trim().is_empty());

        let provider = match read(PROVIDER_VAR) {
            Some(raw) => raw.parse()?,
            None => ProviderKind::default(),
        };
        let data_root = read(DATA_ROOT_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            provider,
            data_root,
            api_url: read(API_URL_VAR),
        })
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_data_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.data_root = root.into();
        self
    }
}
