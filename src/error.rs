use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a setup or persisting a render.
/// `Save` covers the filesystem, `Encode` the PNG stream itself.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read scene file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scene file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid scene: {0}")]
    Invalid(String),

    #[error("can't save output image {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't save output image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: png::EncodingError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
