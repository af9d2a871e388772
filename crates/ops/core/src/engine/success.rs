//! Pure success-chance formulas.
//!
//! Nothing here rolls dice: the chance is a function of the definition, the
//! level, the ledger and the city, so it can be inspected before any roll.

use crate::catalog::{ActionDefinition, ActionType, GeneralKind, Multiplier, Stat};
use crate::config::SimConfig;
use crate::state::{City, OperativeLedger};

/// Which population figure the city factor reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopulationView {
    /// The hidden true population; used for the actual roll.
    Actual,
    /// The operative's estimate; used for what the operative believes.
    Estimated,
}

/// Clamps to `[0, 1]`; NaN reads as 0.
pub fn clamp_chance(chance: f64) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}

/// Success chance of `definition` at `level`, always within `[0, 1]`.
pub fn success_chance(
    definition: &ActionDefinition,
    level: u32,
    ledger: &OperativeLedger,
    city: &City,
    view: PopulationView,
) -> f64 {
    if let Some(kind) = definition.general {
        return general_chance(kind, ledger);
    }
    if definition.requires_community && city.communities() == 0 {
        return 0.0;
    }

    let stats = ledger.stats();
    let mut competence: f64 = definition
        .weights
        .iter()
        .map(|term| {
            let effective = stats.get(term.stat) * ledger.skill_mult(Multiplier::efficiency(term.stat));
            term.weight * effective.max(0.0).powf(term.decay)
        })
        .sum();

    competence *= intelligence_bonus(stats.intelligence);
    competence *= stamina_penalty(ledger);

    let team = ledger.personnel.team_size(&definition.id());
    if definition.kind.accepts_team() && team > 0 {
        competence *= (team as f64).powf(0.05);
    }

    competence *= ledger.skill_mult(Multiplier::SuccessAll);
    competence *= match definition.kind {
        ActionType::Contract => ledger.skill_mult(Multiplier::SuccessContract),
        _ => ledger.skill_mult(Multiplier::SuccessOperation),
    };
    if definition.stealth {
        competence *= ledger.skill_mult(Multiplier::SuccessStealth);
    }
    if definition.kill {
        competence *= ledger.skill_mult(Multiplier::SuccessKill);
    }
    competence *= ledger.multipliers().success_chance;

    let mut difficulty = definition.difficulty(level);
    if definition.city_sensitive {
        let population = match view {
            PopulationView::Actual => city.population(),
            PopulationView::Estimated => city.estimate(),
        };
        competence *= (population / SimConfig::POPULATION_THRESHOLD).powf(SimConfig::POPULATION_EXPONENT);
        if city.chaos() > SimConfig::CHAOS_THRESHOLD {
            difficulty *= (1.0 + city.chaos() - SimConfig::CHAOS_THRESHOLD).sqrt();
        }
    }

    clamp_chance(competence / difficulty)
}

/// `[low, high]` range the operative believes the chance lies in.
///
/// The spread is the gap between the estimated and actual chance, widened
/// on the side the estimate errs toward.
pub fn estimated_success_chance(
    definition: &ActionDefinition,
    level: u32,
    ledger: &OperativeLedger,
    city: &City,
) -> (f64, f64) {
    if let Some(kind) = definition.general {
        let chance = general_chance(kind, ledger);
        return (chance, chance);
    }
    let estimated = success_chance(definition, level, ledger, city, PopulationView::Estimated);
    let actual = success_chance(definition, level, ledger, city, PopulationView::Actual);
    let spread = (actual - estimated).abs();
    let mut low = actual - spread;
    let mut high = actual + spread;

    let ratio = city.population() / city.estimate();
    let ratio = if ratio.is_finite() { ratio } else { 0.0 };
    if ratio < 1.0 {
        low *= ratio;
    } else {
        high *= ratio;
    }
    (clamp_chance(low), clamp_chance(high))
}

fn general_chance(kind: GeneralKind, ledger: &OperativeLedger) -> f64 {
    match kind {
        GeneralKind::Recruitment => {
            let recruited = ledger.personnel.recruited() as f64;
            clamp_chance(ledger.stats().charisma.max(0.0).powf(0.45) / (recruited + 1.0))
        }
        _ => 1.0,
    }
}

/// `1 + 0.75 * int^0.8 / 600`
fn intelligence_bonus(intelligence: f64) -> f64 {
    1.0 + 0.75 * intelligence.max(0.0).powf(0.8) / 600.0
}

/// Full competence above half stamina, linear below.
fn stamina_penalty(ledger: &OperativeLedger) -> f64 {
    (ledger.stamina() / (0.5 * ledger.max_stamina())).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StatWeight;
    use crate::state::{CityName, OperativeMultipliers, OperativeStats};

    fn ledger(level: f64) -> OperativeLedger {
        OperativeLedger::new(
            OperativeStats::uniform(level),
            OperativeMultipliers::default(),
            CityName::Sector12,
        )
    }

    fn contract() -> ActionDefinition {
        ActionDefinition::new(ActionType::Contract, "Tracking", 125.0)
            .with_difficulty_factor(1.02)
            .with_weights(vec![
                StatWeight::new(Stat::Hacking, 0.0, 0.9),
                StatWeight::new(Stat::Strength, 0.05, 0.9),
                StatWeight::new(Stat::Defense, 0.05, 0.9),
                StatWeight::new(Stat::Dexterity, 0.35, 0.9),
                StatWeight::new(Stat::Agility, 0.35, 0.9),
                StatWeight::new(Stat::Charisma, 0.1, 0.9),
                StatWeight::new(Stat::Intelligence, 0.1, 0.9),
            ])
    }

    fn city(chaos: f64) -> City {
        City::new(1e9, 1e9, 10).with_chaos(chaos)
    }

    #[test]
    fn chance_stays_in_unit_interval_at_extremes() {
        let definition = contract();
        for stats in [0.0, 1.0, 1e3, 1e12, f64::MAX] {
            for chaos in [0.0, 49.0, 1e6, 1e300] {
                for level in [1, 10, 1000] {
                    let chance = success_chance(
                        &definition,
                        level,
                        &ledger(stats),
                        &city(chaos),
                        PopulationView::Actual,
                    );
                    assert!((0.0..=1.0).contains(&chance), "{stats} {chaos} {level}: {chance}");
                }
            }
        }
    }

    #[test]
    fn chaos_above_threshold_lowers_chance() {
        let definition = contract();
        let operative = ledger(50.0);
        let calm = success_chance(&definition, 1, &operative, &city(0.0), PopulationView::Actual);
        let riot = success_chance(&definition, 1, &operative, &city(500.0), PopulationView::Actual);
        assert!(calm > 0.0);
        assert!(riot < calm);
    }

    #[test]
    fn community_requirement_zeroes_chance() {
        let raid = ActionDefinition::new(ActionType::Operation, "Raid", 800.0).requiring_community();
        let empty = City::new(1e9, 1e9, 0);
        assert_eq!(
            success_chance(&raid, 1, &ledger(1e6), &empty, PopulationView::Actual),
            0.0
        );
    }

    #[test]
    fn general_actions_always_succeed_except_recruitment() {
        let training = ActionDefinition::general("Training", GeneralKind::Training);
        let recruitment = ActionDefinition::general("Recruitment", GeneralKind::Recruitment);
        let operative = ledger(100.0);
        assert_eq!(
            success_chance(&training, 1, &operative, &city(0.0), PopulationView::Actual),
            1.0
        );
        let expected = 100f64.powf(0.45).min(1.0);
        assert_eq!(
            success_chance(&recruitment, 1, &operative, &city(0.0), PopulationView::Actual),
            expected
        );
    }

    #[test]
    fn accurate_estimate_collapses_the_range() {
        let definition = contract();
        let (low, high) = estimated_success_chance(&definition, 1, &ledger(20.0), &city(0.0));
        assert_eq!(low, high);
    }

    #[test]
    fn underestimate_widens_the_high_side() {
        let definition = contract();
        let operative = ledger(20.0);
        let skewed = City::new(1e9, 0.5e9, 10);
        let actual = success_chance(&definition, 1, &operative, &skewed, PopulationView::Actual);
        let (low, high) = estimated_success_chance(&definition, 1, &operative, &skewed);
        assert!(low <= actual && actual <= high);
        assert!(high > actual);
    }

    #[test]
    fn nan_clamps_to_zero() {
        assert_eq!(clamp_chance(f64::NAN), 0.0);
        assert_eq!(clamp_chance(2.0), 1.0);
        assert_eq!(clamp_chance(-1.0), 0.0);
    }

    #[test]
    fn general_estimate_is_exact() {
        let training = ActionDefinition::general("Training", GeneralKind::Training);
        let skewed = City::new(1e9, 0.25e9, 10);
        assert_eq!(
            estimated_success_chance(&training, 1, &ledger(100.0), &skewed),
            (1.0, 1.0)
        );
    }
}
