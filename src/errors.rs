use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeapError {
    #[error("IO Error at {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl HeapError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HeapError::IoError {
            path: path.into(),
            source,
        }
    }
}

/// Attaches the offending path to a bare `std::io::Error`.
pub trait IoContext<T> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T, HeapError>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T, HeapError> {
        self.map_err(|e| HeapError::io(path, e))
    }
}
