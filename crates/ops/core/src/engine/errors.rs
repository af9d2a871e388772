use crate::catalog::{ActionId, ActionType};
use crate::error::{ErrorKind, ErrorSeverity, SimError};
use crate::pricing::PricingError;

/// Why a black op is locked.
#[derive(Clone, Debug, PartialEq)]
pub enum RankGate {
    /// Rank is below the op's required rank.
    Below { required: f64, current: f64 },
    /// The black op ranked just before this one is not done yet.
    PrecedingIncomplete { preceding: String },
}

impl core::fmt::Display for RankGate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Below { required, current } => {
                write!(f, "rank {current:.2} is below the required {required:.2}")
            }
            Self::PrecedingIncomplete { preceding } => {
                write!(f, "'{preceding}' must be completed first")
            }
        }
    }
}

/// Errors raised by engine mutations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("no {kind} action named '{name}'")]
    UnknownAction { kind: ActionType, name: String },

    #[error("no skill named '{name}'")]
    UnknownSkill { name: String },

    #[error("no city named '{name}'")]
    UnknownCity { name: String },

    #[error("cannot start {id}: {gate}")]
    InsufficientRank { id: ActionId, gate: RankGate },

    #[error("{id} needs {required:.3} stamina but only {available:.3} is left")]
    InsufficientStamina {
        id: ActionId,
        required: f64,
        available: f64,
    },

    #[error("{id} has no remaining count")]
    ActionDepleted { id: ActionId },

    #[error("black op {id} is already completed")]
    AlreadyCompleted { id: ActionId },

    #[error("{id} requires a community but the current city has none")]
    NoCommunities { id: ActionId },

    #[error("level {level} is outside [1, {max_level}] for {id}")]
    LevelOutOfRange {
        id: ActionId,
        level: i64,
        max_level: u32,
    },

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl SimError for EngineError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownAction { .. } | Self::UnknownSkill { .. } | Self::UnknownCity { .. } => {
                ErrorKind::NotFound
            }
            Self::InsufficientRank { .. }
            | Self::InsufficientStamina { .. }
            | Self::ActionDepleted { .. } => ErrorKind::InsufficientResource,
            Self::AlreadyCompleted { .. } | Self::NoCommunities { .. } => ErrorKind::InvalidState,
            Self::LevelOutOfRange { .. } => ErrorKind::OutOfRange,
            Self::Pricing(err) => err.kind(),
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientRank { .. }
            | Self::InsufficientStamina { .. }
            | Self::ActionDepleted { .. }
            | Self::NoCommunities { .. } => ErrorSeverity::Recoverable,
            Self::Pricing(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAction { .. } => "ENGINE_UNKNOWN_ACTION",
            Self::UnknownSkill { .. } => "ENGINE_UNKNOWN_SKILL",
            Self::UnknownCity { .. } => "ENGINE_UNKNOWN_CITY",
            Self::InsufficientRank { .. } => "ENGINE_INSUFFICIENT_RANK",
            Self::InsufficientStamina { .. } => "ENGINE_INSUFFICIENT_STAMINA",
            Self::ActionDepleted { .. } => "ENGINE_ACTION_DEPLETED",
            Self::AlreadyCompleted { .. } => "ENGINE_ALREADY_COMPLETED",
            Self::NoCommunities { .. } => "ENGINE_NO_COMMUNITIES",
            Self::LevelOutOfRange { .. } => "ENGINE_LEVEL_OUT_OF_RANGE",
            Self::Pricing(err) => err.error_code(),
        }
    }
}

impl EngineError {
    pub fn unknown_action(kind: ActionType, name: impl Into<String>) -> Self {
        Self::UnknownAction {
            kind,
            name: name.into(),
        }
    }
}
