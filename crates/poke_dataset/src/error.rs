use std::path::PathBuf;

use showdown_data::DexError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Dex(#[from] DexError),

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to walk {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("slug `{slug}` resolves for both `{existing}` and `{incoming}`")]
    DuplicateSlug {
        slug: String,
        existing: String,
        incoming: String,
    },

    #[error("invalid override `{key}`: {reason}")]
    InvalidOverride { key: String, reason: String },

    #[error("generation {0} is not supported (expected 1-9)")]
    InvalidGeneration(u8),

    #[error("species `{name}` does not exist in generation {gen}")]
    UnknownSpecies { name: String, gen: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
