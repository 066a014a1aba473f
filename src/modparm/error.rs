use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModparmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    Path {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),
}

impl ModparmError {
    pub fn path(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ModparmError::Path {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ModparmError>;
