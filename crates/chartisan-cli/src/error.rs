use std::path::PathBuf;

use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("configuration file is malformed: {0}")]
    ConfigMalformed(serde_json::Error),

    #[error("ticker '{ticker}' is not present in the configuration")]
    FilterNotFound { ticker: String },

    #[error(transparent)]
    Validation(#[from] chartisan_core::ValidationError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::ConfigNotFound { .. } => 2,
            Self::ConfigMalformed(_) => 2,
            Self::FilterNotFound { .. } => 2,
            Self::Validation(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
