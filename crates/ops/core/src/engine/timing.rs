//! Action durations and stamina costs.

use crate::catalog::{ActionDefinition, GeneralKind, Multiplier, Stat};
use crate::config::SimConfig;
use crate::state::OperativeLedger;

/// Whole seconds one attempt of `definition` takes at `level`.
pub fn action_duration(definition: &ActionDefinition, level: u32, ledger: &OperativeLedger) -> f64 {
    match definition.general {
        Some(kind) => kind
            .fixed_duration()
            .unwrap_or_else(|| recruitment_duration(ledger)),
        None => {
            let base = definition.difficulty(level) / SimConfig::DIFFICULTY_TO_TIME_FACTOR;
            let agility = ledger.effective(Stat::Agility);
            let dexterity = ledger.effective(Stat::Dexterity);
            let stat_factor = 0.5
                * (agility.powf(SimConfig::EFF_AGI_EXPONENTIAL_FACTOR)
                    + dexterity.powf(SimConfig::EFF_DEX_EXPONENTIAL_FACTOR)
                    + agility / SimConfig::EFF_AGI_LINEAR_FACTOR
                    + dexterity / SimConfig::EFF_DEX_LINEAR_FACTOR);
            let seconds = base * ledger.skill_mult(Multiplier::ActionTime) / stat_factor;
            if seconds.is_finite() {
                seconds.max(1.0).ceil()
            } else {
                1.0
            }
        }
    }
}

/// `max(10, round(300 - (effCha^0.81 + effCha / 90)))`
fn recruitment_duration(ledger: &OperativeLedger) -> f64 {
    let charisma = ledger.effective(Stat::Charisma);
    (SimConfig::BASE_RECRUITMENT_TIME - (charisma.powf(0.81) + charisma / 90.0))
        .round()
        .max(SimConfig::MIN_RECRUITMENT_TIME)
}

/// Stamina one attempt costs, proportional to its duration.
pub fn stamina_cost(definition: &ActionDefinition, level: u32, duration: f64) -> f64 {
    match definition.general {
        Some(GeneralKind::Training) => {
            0.5 * SimConfig::BASE_STAMINA_LOSS * duration / SimConfig::TRAINING_DURATION
        }
        Some(_) => 0.0,
        None => {
            let difficulty = definition.difficulty(level);
            let multiplier = difficulty.powf(SimConfig::DIFF_MULT_EXPONENTIAL_FACTOR)
                + difficulty / SimConfig::DIFF_MULT_LINEAR_FACTOR;
            let base_time = (difficulty / SimConfig::DIFFICULTY_TO_TIME_FACTOR).max(1.0);
            SimConfig::BASE_STAMINA_LOSS * multiplier * duration / base_time
        }
    }
}

/// Stamina regained over `seconds` of simulated time.
///
/// `(0.0085 + max / 70000) * effAgi^0.17 * staminaSkill * staminaGainMult` per second.
pub fn stamina_regeneration(ledger: &OperativeLedger, seconds: f64) -> f64 {
    let per_second = (SimConfig::STAMINA_GAIN_PER_SECOND
        + ledger.max_stamina() / SimConfig::MAX_STAMINA_TO_GAIN_FACTOR)
        * ledger.effective(Stat::Agility).powf(0.17)
        * ledger.skill_mult(Multiplier::Stamina)
        * ledger.multipliers().stamina_gain;
    per_second * seconds
}
