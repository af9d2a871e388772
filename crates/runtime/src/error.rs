//! Unified error types surfaced by the session API.
//!
//! Wraps engine failures and content loading problems so callers see one
//! error type with the same classification the core uses.
use ops_core::{EngineError, ErrorKind, ErrorSeverity, SimError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum RuntimeError {
    #[error("'{input}' is not an action type")]
    UnknownActionType { input: String },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("content failed to load: {message}")]
    Content { message: String },
}

impl RuntimeError {
    /// Flattens a loader error chain into a message.
    pub(crate) fn content(err: anyhow::Error) -> Self {
        Self::Content {
            message: format!("{err:#}"),
        }
    }
}

impl SimError for RuntimeError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownActionType { .. } => ErrorKind::NotFound,
            Self::Engine(err) => err.kind(),
            Self::Content { .. } => ErrorKind::InvalidState,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownActionType { .. } => ErrorSeverity::Validation,
            Self::Engine(err) => err.severity(),
            Self::Content { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownActionType { .. } => "RUNTIME_UNKNOWN_ACTION_TYPE",
            Self::Engine(err) => err.error_code(),
            Self::Content { .. } => "RUNTIME_CONTENT",
        }
    }
}
