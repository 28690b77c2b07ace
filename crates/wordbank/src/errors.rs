//! # Error Types

use std::path::PathBuf;

/// Errors from wordbank operations.
#[derive(Debug, thiserror::Error)]
pub enum WordbankError {
    /// A required input path does not exist.
    #[error("path not found: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A configuration value is internally inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// A corpus line could not be parsed.
    #[error("corpus format error at line {line}: {message}")]
    CorpusFormat {
        /// The 1-based line number.
        line: usize,

        /// What was wrong with the line.
        message: String,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// JSON error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Error from the build cache.
    #[error(transparent)]
    Cache(#[from] anyhow::Error),
}

/// Result type for wordbank operations.
pub type WBResult<T> = core::result::Result<T, WordbankError>;

/// Check that `path` exists; or return [`WordbankError::NotFound`].
pub fn require_path<P: AsRef<std::path::Path>>(path: P) -> WBResult<()> {
    let path = path.as_ref();
    if path.exists() {
        Ok(())
    } else {
        Err(WordbankError::NotFound {
            path: path.to_path_buf(),
        })
    }
}
