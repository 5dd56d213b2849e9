//! Error types for line corralling and the drafting sinks it feeds.

use thiserror::Error;

/// Errors reported by a drafting sink.
///
/// These mirror the error codes of vector drawing backends (PDF, DWG).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    /// The call carried a parameter the backend cannot draw.
    #[error("bad parameter: {0}")]
    BadParam(String),

    /// The backend does not support this operation.
    #[error("operation not implemented: {0}")]
    Unimplemented(&'static str),

    /// The backend chose to skip this item.
    #[error("item skipped by backend")]
    Skipped,

    /// There is no page to draw on.
    #[error("no active page")]
    NoActivePage,

    /// The backend itself failed.
    #[error("backend failure: {0}")]
    Backend(String),
}

impl DrawError {
    /// Structural errors mean the sink cannot accept any more drawing calls.
    ///
    /// Everything else is scoped to the single item that triggered it.
    pub fn is_structural(&self) -> bool {
        matches!(self, DrawError::NoActivePage | DrawError::Backend(_))
    }
}

/// Errors that can occur while configuring or running a line corral.
#[derive(Error, Debug)]
pub enum CorralError {
    /// The priority list names the same layer twice.
    #[error("layer {0} appears more than once in the priority list")]
    DuplicateLayer(String),

    /// Configuration values are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The downstream sink rejected a flush.
    #[error("sink error: {0}")]
    Sink(#[from] DrawError),
}

/// Result type for corral operations.
pub type Result<T> = std::result::Result<T, CorralError>;
