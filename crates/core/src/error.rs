#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Entity not found: {entity} '{id}'")]
    NotFound { entity: &'static str, id: String },

    #[error("Index {index} out of range for {len} annotations")]
    Range { index: i64, len: usize },

    #[error("Storage error at {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt document at {path}: {reason}")]
    Corrupt { path: String, reason: String },
}

impl CoreError {
    /// Build a [`CoreError::Storage`] for an I/O failure on `path`.
    pub fn storage(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Build a [`CoreError::Corrupt`] for an unreadable document at `path`.
    pub fn corrupt(path: impl AsRef<std::path::Path>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }
}
