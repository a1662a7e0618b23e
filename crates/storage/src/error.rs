use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure of a key/value backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// An in-process backend lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

impl StorageError {
    pub(crate) fn io(key: &str, source: std::io::Error) -> Self {
        Self::Io {
            key: key.to_string(),
            source,
        }
    }
}
