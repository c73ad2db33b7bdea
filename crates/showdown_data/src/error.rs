use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DexError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("generation {0} is not supported (expected 1-9)")]
    UnsupportedGeneration(u8),
}

pub type Result<T> = std::result::Result<T, DexError>;
