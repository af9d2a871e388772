use crate::error::{ErrorKind, ErrorSeverity, SimError};

use super::action::ActionType;

/// Errors raised while validating a catalog at construction.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("{kind} action has an empty name")]
    EmptyName { kind: ActionType },

    #[error("duplicate {kind} action '{name}'")]
    DuplicateAction { kind: ActionType, name: String },

    #[error("{kind} action '{name}': {reason}")]
    InvalidAction {
        kind: ActionType,
        name: String,
        reason: &'static str,
    },

    #[error("black ops '{first}' and '{second}' share required rank {rank}")]
    DuplicateBlackOpRank {
        first: String,
        second: String,
        rank: f64,
    },

    #[error("general action '{name}' has no behaviour")]
    MissingGeneralKind { name: String },

    #[error("skill has an empty name")]
    EmptySkillName,

    #[error("duplicate skill '{name}'")]
    DuplicateSkill { name: String },

    #[error("skill '{name}': {reason}")]
    InvalidSkill { name: String, reason: &'static str },
}

impl SimError for CatalogError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidState
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName { .. } => "CATALOG_EMPTY_NAME",
            Self::DuplicateAction { .. } => "CATALOG_DUPLICATE_ACTION",
            Self::InvalidAction { .. } => "CATALOG_INVALID_ACTION",
            Self::DuplicateBlackOpRank { .. } => "CATALOG_DUPLICATE_BLACK_OP_RANK",
            Self::MissingGeneralKind { .. } => "CATALOG_MISSING_GENERAL_KIND",
            Self::EmptySkillName => "CATALOG_EMPTY_SKILL_NAME",
            Self::DuplicateSkill { .. } => "CATALOG_DUPLICATE_SKILL",
            Self::InvalidSkill { .. } => "CATALOG_INVALID_SKILL",
        }
    }
}
