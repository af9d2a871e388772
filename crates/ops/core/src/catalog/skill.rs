//! Skill definitions and the multipliers they grant.

use std::collections::BTreeMap;

use strum::{Display, EnumIter, EnumString};

use super::action::Stat;

/// Multiplier keys a skill can raise.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Multiplier {
    SuccessAll,
    SuccessStealth,
    SuccessKill,
    SuccessContract,
    SuccessOperation,
    SuccessEstimate,
    ActionTime,
    EffStrength,
    EffDefense,
    EffDexterity,
    EffAgility,
    EffCharisma,
    EffHacking,
    EffIntelligence,
    Stamina,
    Money,
    ExpGain,
}

impl Multiplier {
    /// The efficiency multiplier that scales `stat`.
    pub const fn efficiency(stat: Stat) -> Self {
        match stat {
            Stat::Hacking => Self::EffHacking,
            Stat::Strength => Self::EffStrength,
            Stat::Defense => Self::EffDefense,
            Stat::Dexterity => Self::EffDexterity,
            Stat::Agility => Self::EffAgility,
            Stat::Charisma => Self::EffCharisma,
            Stat::Intelligence => Self::EffIntelligence,
        }
    }

    /// Action time shrinks with skill level; everything else grows.
    pub const fn is_reduction(&self) -> bool {
        matches!(self, Self::ActionTime)
    }
}

/// `percent` per skill level applied to `multiplier`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillEffect {
    pub multiplier: Multiplier,
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub name: String,
    pub base_cost: f64,
    /// Cost added per level already owned. Always positive.
    pub cost_increase: f64,
    pub max_level: Option<u32>,
    pub effects: Vec<SkillEffect>,
}

impl SkillDefinition {
    pub fn new(name: impl Into<String>, base_cost: f64, cost_increase: f64) -> Self {
        Self {
            name: name.into(),
            base_cost,
            cost_increase,
            max_level: None,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, multiplier: Multiplier, percent: f64) -> Self {
        self.effects.push(SkillEffect {
            multiplier,
            percent,
        });
        self
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = Some(max_level);
        self
    }
}

/// Product of every owned skill's contribution, per multiplier key.
///
/// Keys no skill touches read as `1.0`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillMultipliers {
    values: BTreeMap<Multiplier, f64>,
}

impl SkillMultipliers {
    /// Folds `levels` (skill name to owned level) over the definitions.
    ///
    /// Each skill contributes `1 + pct * level / 100`, or `1 - pct * level / 100`
    /// for action time (floored at zero).
    pub fn compute<'a>(
        skills: impl IntoIterator<Item = &'a SkillDefinition>,
        levels: &BTreeMap<String, u32>,
    ) -> Self {
        let mut values = BTreeMap::new();
        for skill in skills {
            let level = levels.get(&skill.name).copied().unwrap_or(0);
            if level == 0 {
                continue;
            }
            for effect in &skill.effects {
                let delta = effect.percent * f64::from(level) / 100.0;
                let factor = if effect.multiplier.is_reduction() {
                    (1.0 - delta).max(0.0)
                } else {
                    1.0 + delta
                };
                *values.entry(effect.multiplier).or_insert(1.0) *= factor;
            }
        }
        Self { values }
    }

    pub fn get(&self, multiplier: Multiplier) -> f64 {
        self.values.get(&multiplier).copied().unwrap_or(1.0)
    }

    pub fn efficiency(&self, stat: Stat) -> f64 {
        self.get(Multiplier::efficiency(stat))
    }
}
