//! Error types for the store layer.

use finq_seeker::SeekerError;

/// Errors that can occur while loading, querying or mutating records.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The static source could not be read.
    #[error("Failed to load {path}: {status}")]
    Load { path: String, status: String },

    /// The source was read but is not a JSON array of the expected records.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The remote provider has no backend behind it.
    #[error("API provider not configured")]
    NotConfigured,

    /// A configuration value could not be understood.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A create or update patch was rejected.
    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    /// The query itself was malformed.
    #[error(transparent)]
    Query(#[from] SeekerError),
}

impl StoreError {
    /// Create a load error.
    pub fn load(path: impl Into<String>, status: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            status: status.into(),
        }
    }

    /// Create a patch error.
    pub fn invalid_patch(msg: impl Into<String>) -> Self {
        Self::InvalidPatch(msg.into())
    }
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
