//! Error types shared across the crate.

/// Errors raised by the markup annotator and configuration checks.
///
/// Mapping and resolution never fail: unrecognised syntax and unresolvable
/// element ids are not errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse rendered markup: {0}")]
    Markup(#[from] roxmltree::Error),
    #[error("invalid preview configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by the external diagram engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
