//! Error taxonomy for the era metrics pipeline.

use std::path::PathBuf;

/// Result alias used across the library crates.
pub type Result<T, E = ReportError> = std::result::Result<T, E>;

/// Fatal failures. Any of these unwinds the whole run; nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    /// An era change event could not be interpreted.
    #[error("malformed era change event: {0}")]
    MalformedEventData(String),

    /// A block height has no canonical hash on the node.
    #[error("no block hash for height {height}")]
    HashLookupFailure {
        /// Block height that could not be resolved
        height: u64,
    },

    /// The persisted era range table has the wrong shape.
    #[error("corrupt range table {path:?} at line {line}: {reason}")]
    CorruptRangeTable {
        /// Path of the table
        path: PathBuf,
        /// 1-based line number of the offending row
        line: u64,
        /// What was wrong with it
        reason: String,
    },

    /// An external query failed or returned an unexpected shape.
    #[error("{source_name} query failed: {reason}")]
    QueryFailure {
        /// Name of the queried source
        source_name: &'static str,
        /// Failure description
        reason: String,
    },

    /// Reading or writing a report file failed.
    #[error("report io on {path:?}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Build a [`ReportError::QueryFailure`] from anything displayable.
    pub fn query<E: std::fmt::Display>(source_name: &'static str, err: E) -> Self {
        Self::QueryFailure { source_name, reason: err.to_string() }
    }

    /// Build a [`ReportError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
