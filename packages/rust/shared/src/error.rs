//! Error types for mdsite.
//!
//! Library crates use [`MdsiteError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all mdsite operations.
#[derive(Debug, thiserror::Error)]
pub enum MdsiteError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network-level failure while fetching a document.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP response for a document fetch.
    ///
    /// The display form carries both the numeric status code and the
    /// canonical reason text so error panels can surface them verbatim.
    #[error("failed to load document: {status} {reason}")]
    Http { status: u16, reason: String },

    /// Markdown parsing or tree transformation error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// HTML rendering error.
    #[error("render error: {0}")]
    Render(String),

    /// A logical document identifier with no mapping, under the
    /// `not-found` unmapped policy.
    #[error("no document mapped for '{path}'")]
    UnmappedDocument { path: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MdsiteError>;

impl MdsiteError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
