//! Common error infrastructure for ops-core.
//!
//! Domain-specific errors (`CatalogError`, `EngineError`) live next to the
//! code that raises them. This module holds the shared classification every
//! one of them reports through [`SimError`].
//!
//! # Design Principles
//!
//! - **Type Safety**: each subsystem has its own error enum
//! - **Classification**: every error maps onto one of four [`ErrorKind`]s
//! - **Local failures**: nothing raised by the core is fatal to the process

/// Caller-facing category of a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Unknown action, skill or city name.
    NotFound,
    /// The operation needs an action (or catalog) in a state it is not in.
    InvalidState,
    /// Rank, stamina, skill points, pool count or personnel exceeded.
    InsufficientResource,
    /// Level, count or team size outside its allowed range.
    OutOfRange,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidState => "invalid_state",
            Self::InsufficientResource => "insufficient_resource",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// Severity level of an error, used for recovery strategies.
///
/// - **Recoverable**: may succeed later without changing arguments (stamina regenerates,
///   rank grows)
/// - **Validation**: the arguments themselves are wrong
/// - **Internal**: the catalog or state is inconsistent; indicates a content bug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if retrying later may succeed.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all ops-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify `kind` by what the caller did wrong, `severity` by recoverability
/// - Error codes are stable strings, safe for scripts to match on
pub trait SimError: core::fmt::Display + core::fmt::Debug {
    /// Caller-facing category.
    fn kind(&self) -> ErrorKind;

    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
