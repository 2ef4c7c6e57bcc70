use thiserror::Error;

/// Errors surfaced by the colony simulation
#[derive(Error, Debug)]
pub enum SimError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Save file could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Config file is not valid TOML for `SimConfig`
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Config parsed but holds values the simulation cannot run with
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// Map file is malformed
    #[error("Invalid map: {0}")]
    InvalidMap(String),
    /// Grid or scratch buffer could not be allocated
    #[error("Allocation failed: {0}")]
    Allocation(String),
    /// Save file written by an incompatible version
    #[error("Unsupported save version: {0}")]
    UnsupportedVersion(u32),
}

impl SimError {
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    #[must_use]
    pub fn invalid_map<S: Into<String>>(msg: S) -> Self {
        Self::InvalidMap(msg.into())
    }
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, SimError>;
