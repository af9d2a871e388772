//! Skill upgrade cost curves and team-size validation.
//!
//! Both are pure: they price or validate a request against numbers the
//! caller passes in and never touch session state. The engine applies the
//! result only when validation passes, so purchases are all-or-nothing.

use crate::catalog::{ActionType, SkillDefinition};
use crate::error::{ErrorKind, ErrorSeverity, SimError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("skill upgrade count must be at least 1")]
    InvalidCount,

    #[error("skill '{skill}' is capped at level {max_level}; cannot reach {requested}")]
    SkillAtMaxLevel {
        skill: String,
        max_level: u32,
        requested: u64,
    },

    #[error("upgrade costs {cost} skill points but only {available} are available")]
    InsufficientSkillPoints { cost: u64, available: u64 },

    #[error("team size cannot be negative (got {size})")]
    NegativeTeamSize { size: i64 },

    #[error("{kind} actions do not take a team")]
    TeamNotSupported { kind: ActionType },

    #[error("team of {requested} needs {required} personnel but only {available} are recruited")]
    InsufficientPersonnel {
        requested: u64,
        required: u64,
        available: u64,
    },
}

impl SimError for PricingError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCount | Self::SkillAtMaxLevel { .. } | Self::NegativeTeamSize { .. } => {
                ErrorKind::OutOfRange
            }
            Self::InsufficientSkillPoints { .. } | Self::InsufficientPersonnel { .. } => {
                ErrorKind::InsufficientResource
            }
            Self::TeamNotSupported { .. } => ErrorKind::InvalidState,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientSkillPoints { .. } | Self::InsufficientPersonnel { .. } => {
                ErrorSeverity::Recoverable
            }
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCount => "PRICING_INVALID_COUNT",
            Self::SkillAtMaxLevel { .. } => "PRICING_SKILL_AT_MAX_LEVEL",
            Self::InsufficientSkillPoints { .. } => "PRICING_INSUFFICIENT_SKILL_POINTS",
            Self::NegativeTeamSize { .. } => "PRICING_NEGATIVE_TEAM_SIZE",
            Self::TeamNotSupported { .. } => "PRICING_TEAM_NOT_SUPPORTED",
            Self::InsufficientPersonnel { .. } => "PRICING_INSUFFICIENT_PERSONNEL",
        }
    }
}

/// Total price of `count` levels starting at `from_level`.
///
/// `floor(((count * baseCost) + costIncrease * (count * from + count * (count - 1) / 2)) * multiplier)`:
/// the arithmetic series of the per-level prices, so the total is convex in
/// `count` and priced in constant time. Saturates at `u64::MAX`.
pub fn skill_upgrade_cost(
    skill: &SkillDefinition,
    from_level: u32,
    count: u32,
    cost_multiplier: f64,
) -> Result<u64, PricingError> {
    if count == 0 {
        return Err(PricingError::InvalidCount);
    }
    let requested = u64::from(from_level) + u64::from(count);
    if let Some(max_level) = skill.max_level
        && requested > u64::from(max_level)
    {
        return Err(PricingError::SkillAtMaxLevel {
            skill: skill.name.clone(),
            max_level,
            requested,
        });
    }
    let count = f64::from(count);
    let from = f64::from(from_level);
    let series = count * skill.base_cost
        + skill.cost_increase * (count * from + count * (count - 1.0) / 2.0);
    let cost = series * cost_multiplier;
    if cost.is_nan() || cost <= 0.0 {
        return Ok(0);
    }
    // float-to-int casts saturate
    Ok(cost.floor() as u64)
}

/// Rejects purchases the operative cannot afford.
pub fn ensure_affordable(cost: u64, available: u64) -> Result<(), PricingError> {
    if cost > available {
        return Err(PricingError::InsufficientSkillPoints { cost, available });
    }
    Ok(())
}

/// Validates a team assignment against the shared pool.
///
/// `assigned_elsewhere` is the sum of every other action's assignment.
/// Returns the size to store.
pub fn validate_team_size(
    kind: ActionType,
    size: i64,
    assigned_elsewhere: u64,
    recruited: u64,
) -> Result<u64, PricingError> {
    if !kind.accepts_team() {
        return Err(PricingError::TeamNotSupported { kind });
    }
    if size < 0 {
        return Err(PricingError::NegativeTeamSize { size });
    }
    let requested = size as u64;
    let required = assigned_elsewhere.saturating_add(requested);
    if required > recruited {
        return Err(PricingError::InsufficientPersonnel {
            requested,
            required,
            available: recruited,
        });
    }
    Ok(requested)
}
