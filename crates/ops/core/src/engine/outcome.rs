//! Outcome rolls, reward formulas and city-effect application.

use crate::catalog::{ActionDefinition, ActionId, CityEffect, lerp};
use crate::config::SimConfig;
use crate::rng::RngOracle;
use crate::state::{Cities, CityName, Migration, MigrationRolls};

/// Every random draw one completion consumes.
///
/// Resolution is a pure function of these values, so replaying the same
/// bundle replays the same outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutcomeRolls {
    /// Compared against the success chance; success when strictly below.
    pub chance: f64,
    /// Picks magnitudes of ranged city effects and team losses.
    pub variance: f64,
    /// Compared against a potential migration's chance.
    pub trigger: f64,
    pub destination: f64,
    pub spread: f64,
    pub community: f64,
}

impl OutcomeRolls {
    pub fn draw(rng: &mut impl RngOracle) -> Self {
        Self {
            chance: rng.next_f64(),
            variance: rng.next_f64(),
            trigger: rng.next_f64(),
            destination: rng.next_f64(),
            spread: rng.next_f64(),
            community: rng.next_f64(),
        }
    }

    /// Fixed chance roll with every other draw at its midpoint.
    pub const fn with_chance(chance: f64) -> Self {
        Self {
            chance,
            variance: 0.5,
            trigger: 0.5,
            destination: 0.5,
            spread: 0.5,
            community: 0.5,
        }
    }

    fn migration(&self) -> MigrationRolls {
        MigrationRolls {
            destination: self.destination,
            percent: self.spread,
            community: self.community,
        }
    }

    /// Integer in `[min, max]` picked by the variance roll.
    pub(crate) fn pick(&self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        let span = (max - min + 1) as f64;
        let offset = (self.variance.clamp(0.0, 1.0) * span).floor() as u64;
        min + offset.min(max - min)
    }
}

/// What one completion did.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Completion {
    pub id: ActionId,
    pub level: u32,
    pub chance: f64,
    pub success: bool,
    /// Signed rank change actually applied.
    pub rank_change: f64,
    pub skill_points_gained: u64,
    pub personnel_lost: u64,
    pub migration: Option<Migration>,
}

/// `rankGain * rewardFactor^(level-1) * globalRankMultiplier`
pub fn rank_reward(definition: &ActionDefinition, level: u32, rank_multiplier: f64) -> f64 {
    definition.rank_gain * definition.reward_multiplier(level) * rank_multiplier
}

/// `rankLoss * rewardFactor^(level-1)`
pub fn rank_penalty(definition: &ActionDefinition, level: u32) -> f64 {
    definition.rank_loss * definition.reward_multiplier(level)
}

/// `250e3 * rewardFactor^(level-1) * moneySkill`
pub fn contract_earnings(definition: &ActionDefinition, level: u32, money_mult: f64) -> f64 {
    SimConfig::CONTRACT_BASE_MONEY_GAIN * definition.reward_multiplier(level) * money_mult
}

/// Applies `effects` to `city` in order. Returns the migration, if one fired.
pub(crate) fn apply_city_effects(
    cities: &mut Cities,
    city: CityName,
    effects: &[CityEffect],
    rolls: &OutcomeRolls,
    estimate_mult: f64,
) -> Option<Migration> {
    let mut migration = None;
    for effect in effects {
        let target = cities.get_mut(city);
        match *effect {
            CityEffect::ImproveEstimateByCount { min, max } => {
                let count = lerp(min, max, rolls.variance).round();
                target.improve_estimate_by_count(count * estimate_mult);
            }
            CityEffect::ImproveEstimateByPercent { percent } => {
                target.improve_estimate_by_percent(percent * estimate_mult);
            }
            CityEffect::PopulationByCount { count } => target.change_population_by_count(count),
            CityEffect::PopulationByPercent {
                min,
                max,
                estimate_follows,
            } => {
                target.change_population_by_percent(lerp(min, max, rolls.variance), estimate_follows);
            }
            CityEffect::ChaosByCount { count } => target.change_chaos_by_count(count),
            CityEffect::ChaosByPercent { min, max } => {
                target.change_chaos_by_percent(lerp(min, max, rolls.variance));
            }
            CityEffect::RemoveCommunity => {
                target.remove_community();
            }
            CityEffect::PotentialMigration { chance } => {
                if rolls.trigger < chance {
                    migration = Some(cities.migrate(city, rolls.migration()));
                }
            }
        }
    }
    migration
}
